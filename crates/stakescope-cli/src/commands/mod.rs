// crates/stakescope-cli/src/commands/mod.rs
//
// Command module declarations and the context every command runs with.

pub mod cadence;
pub mod census;
pub mod historical;
pub mod report;
pub mod yields;

use stakescope_core::QueryError;
use stakescope_rpc::RpcClient;

use crate::config::StakescopeConfig;
use crate::output::OutputFormat;

/// Resolved configuration and output mode shared by all commands.
pub struct AppContext {
    pub config: StakescopeConfig,
    pub format: OutputFormat,
}

impl AppContext {
    /// Open a client for one routine. The client is released when the
    /// caller's scope ends, whether the routine succeeded or not.
    pub fn connect(&self) -> Result<RpcClient, QueryError> {
        let client = RpcClient::new(&self.config.rpc)?;
        tracing::debug!(endpoint = client.endpoint(), "Opened RPC client");
        Ok(client)
    }
}
