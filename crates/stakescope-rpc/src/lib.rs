// crates/stakescope-rpc/src/lib.rs
//
// stakescope-rpc: JSON-RPC 2.0 over HTTP implementation of
// `stakescope_core::QueryClient`.
//
// Missing-block error codes from `getBlockTime` are surfaced as
// `QueryError::BlockUnavailable`; everything else keeps its code in
// `QueryError::Rpc`.

pub mod client;
pub mod config;
pub mod models;

// Re-export the main client type for ergonomic access.
pub use client::RpcClient;
pub use config::{Commitment, RpcConfig};
