// crates/stakescope-economics/src/staking.rs
//
// Staked-ratio measurement: active stake over circulating supply.

use serde::{Deserialize, Serialize};

use crate::token::lamports_to_sol;

/// Point-in-time stake figures, in lamports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeSnapshot {
    /// Activated stake summed over current and delinquent vote accounts.
    pub total_active_stake: u64,
    /// Circulating supply.
    pub circulating_supply: u64,
    /// `total_active_stake / circulating_supply`.
    pub staked_ratio: f64,
}

impl StakeSnapshot {
    /// Build a snapshot, or `None` when the circulating supply is zero.
    pub fn new(total_active_stake: u64, circulating_supply: u64) -> Option<Self> {
        let staked_ratio = staked_ratio(total_active_stake, circulating_supply)?;
        Some(Self {
            total_active_stake,
            circulating_supply,
            staked_ratio,
        })
    }

    pub fn total_active_stake_sol(&self) -> f64 {
        lamports_to_sol(self.total_active_stake)
    }

    pub fn circulating_supply_sol(&self) -> f64 {
        lamports_to_sol(self.circulating_supply)
    }
}

/// Fraction of circulating supply that is staked.
///
/// Returns `None` when `circulating` is zero. The ratio can exceed 1.0:
/// stake held by non-circulating accounts still counts as active stake.
pub fn staked_ratio(total_active_stake: u64, circulating: u64) -> Option<f64> {
    if circulating == 0 {
        return None;
    }
    Some(total_active_stake as f64 / circulating as f64)
}
