// crates/stakescope-analysis/src/lib.rs
//
// stakescope-analysis: the analytical routines that drive a `QueryClient`.
//
// - census:  active vs. delinquent validators
// - cadence: gap-tolerant average time between consecutive blocks
// - yields:  live and historical staking yield estimates
//
// Each routine borrows the client for its own duration only and returns a
// structured value; printing is left to the caller.

pub mod cadence;
pub mod census;
pub mod yields;

pub use cadence::{
    CadenceReport, CadenceSampler, SamplerConfig, SlotOutcome, DEFAULT_MAX_LOOKBACK_SLOTS,
};
pub use census::take_census;
pub use yields::{
    estimate_live_yield, measure_stake, reconstruct_historical_yield, HistoricalEstimate,
    HistoricalParams, LiveYieldEstimate, DEFAULT_HISTORICAL_STAKED_RATIO,
    DEFAULT_HISTORICAL_START_SLOT,
};
