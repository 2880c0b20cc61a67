// crates/stakescope-core/src/lib.rs
//
// stakescope-core: value types, the query client trait, and the error
// taxonomy shared by every stakescope crate.
//
// This is the leaf crate of the workspace. It performs no I/O of its own;
// transports implement `QueryClient` and analytical routines consume it.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use stakescope_core::ValidatorCensus;`

// Value types
pub use types::{
    BlockTimeWindow, InflationRate, InflationSchedule, Slot, SlotTimestampSample, Supply,
    UnixTimestamp, ValidatorCensus, ValidatorSets, VoteAccount,
};

// Error types
pub use error::{AnalysisError, QueryError};

// Traits
pub use traits::QueryClient;
