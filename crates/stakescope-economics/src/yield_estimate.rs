// crates/stakescope-economics/src/yield_estimate.rs
//
// Annualized staking yield from inflation, staked ratio, and block cadence.
//
// Inflation is scheduled against a target slot time. When slots are slower
// than target, fewer slots (and so fewer epochs) fit into a year and the
// realized issuance shrinks proportionally:
//
//   nominal = inflation * (target_slot_time / avg_slot_time) / staked_ratio
//   real    = nominal / (1 + inflation)
//
// The real-yield line is the simplified form of
// `1 + nominal / (1 + inflation) - 1`. It is NOT the Fisher relation
// `(1 + nominal) / (1 + inflation) - 1`; the two differ by
// `-inflation / (1 + inflation)`.

use serde::{Deserialize, Serialize};

/// Slot time the inflation schedule is calibrated against, in seconds.
pub const TARGET_SLOT_TIME_SECS: f64 = 0.4;

/// Inputs to a single yield estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldInputs {
    /// Annual inflation rate as a fraction.
    pub inflation_rate: f64,
    /// Fraction of circulating supply that is staked. Must be > 0.
    pub staked_ratio: f64,
    /// Observed average slot time in seconds. Must be > 0.
    pub avg_slot_time: f64,
    /// Scheduled slot time in seconds.
    pub target_slot_time: f64,
}

impl YieldInputs {
    /// Inputs with the default 0.4s target slot time.
    pub fn new(inflation_rate: f64, staked_ratio: f64, avg_slot_time: f64) -> Self {
        Self {
            inflation_rate,
            staked_ratio,
            avg_slot_time,
            target_slot_time: TARGET_SLOT_TIME_SECS,
        }
    }

    pub fn with_target_slot_time(mut self, target_slot_time: f64) -> Self {
        self.target_slot_time = target_slot_time;
        self
    }
}

/// Nominal and inflation-adjusted yield, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    pub nominal_yield: f64,
    pub real_yield: f64,
}

/// Estimate staking yield.
///
/// No precondition checks: a zero `avg_slot_time` or `staked_ratio` yields
/// infinities/NaN per IEEE 754. Callers guarantee both are positive.
pub fn estimate_yield(inputs: &YieldInputs) -> YieldResult {
    let nominal_yield = inputs.inflation_rate * (inputs.target_slot_time / inputs.avg_slot_time)
        / inputs.staked_ratio;
    let real_yield = nominal_yield / (1.0 + inputs.inflation_rate);

    YieldResult {
        nominal_yield,
        real_yield,
    }
}
