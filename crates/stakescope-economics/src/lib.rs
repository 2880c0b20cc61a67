// crates/stakescope-economics/src/lib.rs
//
// stakescope-economics: pure arithmetic for staking yield estimation.
//
// Nothing in this crate performs I/O. All supply amounts are in lamports
// (the smallest unit); rates are plain fractions (0.08 == 8%).

pub mod staking;
pub mod taper;
pub mod token;
pub mod yield_estimate;

// Re-export key types for ergonomic access from downstream crates.
pub use staking::{staked_ratio, StakeSnapshot};
pub use taper::{days_between, historical_inflation, DAYS_PER_YEAR};
pub use token::{lamports_to_sol, LAMPORTS_PER_SOL};
pub use yield_estimate::{estimate_yield, YieldInputs, YieldResult, TARGET_SLOT_TIME_SECS};
