// crates/stakescope-rpc/src/config.rs
//
// Connection settings for the JSON-RPC query client. Passed explicitly into
// `RpcClient::new`; nothing is read from the environment here.

use serde::{Deserialize, Serialize};

/// Confirmation level the node answers queries at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    #[default]
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// Configuration for an `RpcClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// HTTP(S) URL of the node's JSON-RPC endpoint.
    #[serde(default = "default_url")]
    pub url: String,

    /// Commitment level sent with every query that accepts one.
    #[serde(default)]
    pub commitment: Commitment,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional bearer token for authenticated RPC providers.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            commitment: Commitment::default(),
            timeout_secs: default_timeout_secs(),
            auth_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RpcConfig::default();
        assert_eq!(config.url, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.commitment, Commitment::Finalized);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RpcConfig =
            serde_json::from_str(r#"{"url":"http://127.0.0.1:8899","commitment":"confirmed"}"#)
                .unwrap();
        assert_eq!(config.url, "http://127.0.0.1:8899");
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_commitment_as_str() {
        assert_eq!(Commitment::Processed.as_str(), "processed");
        assert_eq!(Commitment::Confirmed.as_str(), "confirmed");
        assert_eq!(Commitment::Finalized.as_str(), "finalized");
    }
}
