// crates/stakescope-core/src/traits.rs

use async_trait::async_trait;

use crate::error::QueryError;
use crate::types::{InflationSchedule, InflationRate, Slot, Supply, UnixTimestamp, ValidatorSets};

/// Read-only view of a network node.
///
/// Implemented by stakescope-rpc (JSON-RPC over HTTP). Analytical routines
/// take `&C where C: QueryClient + ?Sized` so tests can substitute an
/// in-memory client.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Current and delinquent validator vote accounts.
    async fn get_validator_sets(&self) -> Result<ValidatorSets, QueryError>;

    /// Most recent slot the node knows about at its configured commitment.
    async fn get_latest_reference_slot(&self) -> Result<Slot, QueryError>;

    /// Estimated production time of the block in `slot`.
    ///
    /// Returns `Ok(None)` when the node has no value for the slot, and
    /// `Err(QueryError::BlockUnavailable)` when the block was skipped or
    /// pruned from long-term storage.
    async fn get_block_timestamp(&self, slot: Slot) -> Result<Option<UnixTimestamp>, QueryError>;

    /// Total, circulating, and non-circulating supply.
    async fn get_supply(&self) -> Result<Supply, QueryError>;

    /// Inflation rates for the current epoch.
    async fn get_inflation_rate(&self) -> Result<InflationRate, QueryError>;

    /// The network's disinflation schedule.
    async fn get_inflation_schedule(&self) -> Result<InflationSchedule, QueryError>;
}
