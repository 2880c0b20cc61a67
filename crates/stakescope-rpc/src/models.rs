// crates/stakescope-rpc/src/models.rs
//
// JSON-RPC 2.0 envelopes and the node's result shapes, with conversions
// into stakescope-core value types. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use stakescope_core::{InflationRate, InflationSchedule, Supply, ValidatorSets, VoteAccount};

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// The node has not yet produced or confirmed the block.
pub const BLOCK_NOT_AVAILABLE: i64 = -32004;

/// The slot was skipped, or is missing after a jump to a recent snapshot.
pub const SLOT_SKIPPED: i64 = -32007;

/// The slot was skipped, or is missing in long-term storage.
pub const LONG_TERM_STORAGE_SLOT_SKIPPED: i64 = -32009;

/// Whether `code` means "there is no block in this slot".
pub fn is_missing_block_code(code: i64) -> bool {
    code == SLOT_SKIPPED || code == LONG_TERM_STORAGE_SLOT_SKIPPED
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse<T> {
    /// Absent on error; `null` for nullable results such as `getBlockTime`.
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Results wrapped with the slot they were evaluated at.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub context: RpcResponseContext,
    pub value: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponseContext {
    pub slot: u64,
}

// ---------------------------------------------------------------------------
// Result shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcVoteAccountInfo {
    pub vote_pubkey: String,
    pub node_pubkey: String,
    pub activated_stake: u64,
    pub commission: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcVoteAccountStatus {
    pub current: Vec<RpcVoteAccountInfo>,
    pub delinquent: Vec<RpcVoteAccountInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcSupply {
    pub total: u64,
    pub circulating: u64,
    pub non_circulating: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcInflationRate {
    pub total: f64,
    pub validator: f64,
    pub foundation: f64,
    pub epoch: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcInflationGovernor {
    pub initial: f64,
    pub terminal: f64,
    pub taper: f64,
    pub foundation: f64,
    pub foundation_term: f64,
}

impl From<RpcVoteAccountInfo> for VoteAccount {
    fn from(info: RpcVoteAccountInfo) -> Self {
        VoteAccount {
            vote_pubkey: info.vote_pubkey,
            node_pubkey: info.node_pubkey,
            activated_stake: info.activated_stake,
            commission: info.commission,
        }
    }
}

impl From<RpcVoteAccountStatus> for ValidatorSets {
    fn from(status: RpcVoteAccountStatus) -> Self {
        ValidatorSets {
            current: status.current.into_iter().map(VoteAccount::from).collect(),
            delinquent: status.delinquent.into_iter().map(VoteAccount::from).collect(),
        }
    }
}

impl From<RpcSupply> for Supply {
    fn from(s: RpcSupply) -> Self {
        Supply {
            total: s.total,
            circulating: s.circulating,
            non_circulating: s.non_circulating,
        }
    }
}

impl From<RpcInflationRate> for InflationRate {
    fn from(r: RpcInflationRate) -> Self {
        InflationRate {
            total: r.total,
            validator: r.validator,
            foundation: r.foundation,
            epoch: r.epoch,
        }
    }
}

impl From<RpcInflationGovernor> for InflationSchedule {
    fn from(g: RpcInflationGovernor) -> Self {
        InflationSchedule {
            initial: g.initial,
            terminal: g.terminal,
            taper: g.taper,
            foundation: g.foundation,
            foundation_term: g.foundation_term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = JsonRpcRequest::new(7, "getBlockTime", serde_json::json!([1000]));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"jsonrpc": "2.0", "id": 7, "method": "getBlockTime", "params": [1000]})
        );
    }

    #[test]
    fn test_null_result_is_none() {
        let response: JsonRpcResponse<i64> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_absent_result_is_none_for_non_default_types() {
        let response: JsonRpcResponse<RpcResponse<RpcSupply>> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":3}"#).unwrap();
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_error_response() {
        let response: JsonRpcResponse<i64> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32009,"message":"Slot 5 was skipped, or missing in long-term storage"}}"#,
        )
        .unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, LONG_TERM_STORAGE_SLOT_SKIPPED);
    }

    #[test]
    fn test_missing_block_codes() {
        assert!(is_missing_block_code(SLOT_SKIPPED));
        assert!(is_missing_block_code(LONG_TERM_STORAGE_SLOT_SKIPPED));
        assert!(!is_missing_block_code(BLOCK_NOT_AVAILABLE));
        assert!(!is_missing_block_code(-32603));
    }

    #[test]
    fn test_vote_accounts_ignore_extra_fields() {
        let status: RpcVoteAccountStatus = serde_json::from_str(
            r#"{
                "current": [{
                    "votePubkey": "V1", "nodePubkey": "N1", "activatedStake": 42,
                    "commission": 7, "epochVoteAccount": true, "lastVote": 10, "rootSlot": 9,
                    "epochCredits": [[1, 64, 0]]
                }],
                "delinquent": []
            }"#,
        )
        .unwrap();
        let sets = ValidatorSets::from(status);
        assert_eq!(sets.current.len(), 1);
        assert_eq!(sets.current[0].activated_stake, 42);
        assert_eq!(sets.current[0].vote_pubkey, "V1");
        assert!(sets.delinquent.is_empty());
    }
}
