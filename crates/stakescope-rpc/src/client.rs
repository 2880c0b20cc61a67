// crates/stakescope-rpc/src/client.rs
//
// JSON-RPC client that POSTs requests to a node's HTTP endpoint and
// implements `QueryClient` on top of them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use stakescope_core::{
    InflationRate, InflationSchedule, QueryClient, QueryError, Slot, Supply, UnixTimestamp,
    ValidatorSets,
};

use crate::config::{Commitment, RpcConfig};
use crate::models::{
    is_missing_block_code, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcInflationGovernor,
    RpcInflationRate, RpcResponse, RpcSupply, RpcVoteAccountStatus,
};

/// A query client bound to one node endpoint.
///
/// Holds its own HTTP connection pool; dropping the client releases it.
pub struct RpcClient {
    endpoint: Url,
    http: reqwest::Client,
    commitment: Commitment,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Build a client from explicit configuration.
    ///
    /// # Errors
    /// Returns `QueryError::Transport` if the URL or auth token is malformed,
    /// or the HTTP client cannot be constructed.
    pub fn new(config: &RpcConfig) -> Result<Self, QueryError> {
        let endpoint = Url::parse(&config.url)
            .map_err(|e| QueryError::Transport(format!("Invalid RPC URL {}: {}", config.url, e)))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| QueryError::Transport(format!("Invalid auth token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| QueryError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            http,
            commitment: config.commitment,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn commitment_config(&self) -> Value {
        json!({ "commitment": self.commitment.as_str() })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<JsonRpcResponse<T>, QueryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);
        tracing::debug!(method, id, "Sending RPC request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| QueryError::Transport(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(format!("{} response unreadable: {}", method, e)))?;

        match serde_json::from_str::<JsonRpcResponse<T>>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(QueryError::Transport(format!(
                "{} returned HTTP {}",
                method, status
            ))),
            Err(e) => Err(QueryError::Decode(format!("{}: {}", method, e))),
        }
    }

    /// Call a method whose result may legitimately be `null`.
    async fn call_nullable<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        slot: Option<Slot>,
    ) -> Result<Option<T>, QueryError> {
        let response = self.send::<T>(method, params).await?;
        if let Some(error) = response.error {
            return Err(classify_error(error, slot));
        }
        Ok(response.result)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, QueryError> {
        self.call_nullable(method, params, None)
            .await?
            .ok_or_else(|| QueryError::Decode(format!("{}: missing result", method)))
    }
}

/// Map a node error object onto the query error taxonomy.
///
/// Missing-block codes only become `BlockUnavailable` for per-slot queries.
fn classify_error(error: JsonRpcError, slot: Option<Slot>) -> QueryError {
    match slot {
        Some(slot) if is_missing_block_code(error.code) => QueryError::BlockUnavailable {
            slot,
            code: error.code,
            message: error.message,
        },
        _ => QueryError::Rpc {
            code: error.code,
            message: error.message,
        },
    }
}

#[async_trait]
impl QueryClient for RpcClient {
    async fn get_validator_sets(&self) -> Result<ValidatorSets, QueryError> {
        let status: RpcVoteAccountStatus = self
            .call("getVoteAccounts", json!([self.commitment_config()]))
            .await?;
        Ok(status.into())
    }

    async fn get_latest_reference_slot(&self) -> Result<Slot, QueryError> {
        self.call("getSlot", json!([self.commitment_config()])).await
    }

    async fn get_block_timestamp(&self, slot: Slot) -> Result<Option<UnixTimestamp>, QueryError> {
        self.call_nullable("getBlockTime", json!([slot]), Some(slot)).await
    }

    async fn get_supply(&self) -> Result<Supply, QueryError> {
        let mut config = self.commitment_config();
        config["excludeNonCirculatingAccountsList"] = Value::Bool(true);
        let response: RpcResponse<RpcSupply> = self.call("getSupply", json!([config])).await?;
        tracing::debug!(context_slot = response.context.slot, "Fetched supply");
        Ok(response.value.into())
    }

    async fn get_inflation_rate(&self) -> Result<InflationRate, QueryError> {
        let rate: RpcInflationRate = self.call("getInflationRate", json!([])).await?;
        Ok(rate.into())
    }

    async fn get_inflation_schedule(&self) -> Result<InflationSchedule, QueryError> {
        let governor: RpcInflationGovernor = self
            .call("getInflationGovernor", json!([self.commitment_config()]))
            .await?;
        Ok(governor.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use std::net::TcpListener;

    fn localhost_binding_permitted() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &ServerGuard) -> RpcClient {
        let config = RpcConfig {
            url: server.url(),
            ..RpcConfig::default()
        };
        RpcClient::new(&config).expect("client")
    }

    async fn mock_method(server: &mut ServerGuard, body_match: Value, response: &str) -> mockito::Mock {
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(body_match))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response)
            .create_async()
            .await
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = RpcConfig {
            url: "not a url".to_string(),
            ..RpcConfig::default()
        };
        assert!(matches!(RpcClient::new(&config), Err(QueryError::Transport(_))));
    }

    #[test]
    fn test_classify_error_only_for_slot_queries() {
        let skipped = JsonRpcError {
            code: -32007,
            message: "Slot 9 was skipped".to_string(),
        };
        assert!(classify_error(skipped.clone(), Some(9)).is_block_unavailable());
        assert!(matches!(
            classify_error(skipped, None),
            QueryError::Rpc { code: -32007, .. }
        ));
    }

    #[tokio::test]
    async fn test_block_time_valid() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"jsonrpc": "2.0", "method": "getBlockTime", "params": [1000]}),
            r#"{"jsonrpc":"2.0","id":1,"result":1700000000}"#,
        )
        .await;

        let client = client_for(&server);
        assert_eq!(client.get_block_timestamp(1000).await.unwrap(), Some(1_700_000_000));
    }

    #[tokio::test]
    async fn test_block_time_null_is_none() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"method": "getBlockTime"}),
            r#"{"jsonrpc":"2.0","id":1,"result":null}"#,
        )
        .await;

        let client = client_for(&server);
        assert_eq!(client.get_block_timestamp(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_long_term_storage_miss_is_block_unavailable() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"method": "getBlockTime", "params": [120000000]}),
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32009,"message":"Slot 120000000 was skipped, or missing in long-term storage"}}"#,
        )
        .await;

        let client = client_for(&server);
        match client.get_block_timestamp(120_000_000).await {
            Err(QueryError::BlockUnavailable { slot, code, .. }) => {
                assert_eq!(slot, 120_000_000);
                assert_eq!(code, -32009);
            }
            other => panic!("expected BlockUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_block_not_available_stays_fatal() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"method": "getBlockTime"}),
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32004,"message":"Block not available for slot 77"}}"#,
        )
        .await;

        let client = client_for(&server);
        let err = client.get_block_timestamp(77).await.unwrap_err();
        assert!(!err.is_block_unavailable());
        assert!(matches!(err, QueryError::Rpc { code: -32004, .. }));
    }

    #[tokio::test]
    async fn test_get_slot_sends_commitment() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"method": "getSlot", "params": [{"commitment": "finalized"}]}),
            r#"{"jsonrpc":"2.0","id":1,"result":287000123}"#,
        )
        .await;

        let client = client_for(&server);
        assert_eq!(client.get_latest_reference_slot().await.unwrap(), 287_000_123);
    }

    #[tokio::test]
    async fn test_vote_accounts() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"method": "getVoteAccounts"}),
            r#"{"jsonrpc":"2.0","id":1,"result":{
                "current":[
                    {"votePubkey":"V1","nodePubkey":"N1","activatedStake":1000,"commission":5},
                    {"votePubkey":"V2","nodePubkey":"N2","activatedStake":2000,"commission":10}
                ],
                "delinquent":[
                    {"votePubkey":"V3","nodePubkey":"N3","activatedStake":300,"commission":100}
                ]}}"#,
        )
        .await;

        let client = client_for(&server);
        let sets = client.get_validator_sets().await.unwrap();
        assert_eq!(sets.current.len(), 2);
        assert_eq!(sets.delinquent.len(), 1);
        assert_eq!(sets.total_activated_stake(), 3_300);
    }

    #[tokio::test]
    async fn test_supply_unwraps_context() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"method": "getSupply", "params": [{"commitment": "finalized", "excludeNonCirculatingAccountsList": true}]}),
            r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":99},"value":{
                "total":600,"circulating":500,"nonCirculating":100,"nonCirculatingAccounts":[]}}}"#,
        )
        .await;

        let client = client_for(&server);
        let supply = client.get_supply().await.unwrap();
        assert_eq!(supply.total, 600);
        assert_eq!(supply.circulating, 500);
        assert_eq!(supply.non_circulating, 100);
    }

    #[tokio::test]
    async fn test_inflation_rate_and_governor() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _rate = mock_method(
            &mut server,
            json!({"method": "getInflationRate"}),
            r#"{"jsonrpc":"2.0","id":1,"result":{"epoch":650,"foundation":0.0,"total":0.0467,"validator":0.0467}}"#,
        )
        .await;
        let _governor = mock_method(
            &mut server,
            json!({"method": "getInflationGovernor"}),
            r#"{"jsonrpc":"2.0","id":2,"result":{"foundation":0.05,"foundationTerm":7.0,"initial":0.08,"taper":0.15,"terminal":0.015}}"#,
        )
        .await;

        let client = client_for(&server);
        let rate = client.get_inflation_rate().await.unwrap();
        assert_eq!(rate.epoch, 650);
        assert_eq!(rate.total, 0.0467);

        let schedule = client.get_inflation_schedule().await.unwrap();
        assert_eq!(schedule.taper, 0.15);
        assert_eq!(schedule.foundation_term, 7.0);
    }

    #[tokio::test]
    async fn test_http_error_is_transport() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_latest_reference_slot().await.unwrap_err();
        assert!(matches!(err, QueryError::Transport(_)));
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>hello</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_inflation_rate().await.unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_result_is_decode_error() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = mock_method(
            &mut server,
            json!({"method": "getSlot"}),
            r#"{"jsonrpc":"2.0","id":1}"#,
        )
        .await;

        let client = client_for(&server);
        let err = client.get_latest_reference_slot().await.unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_auth_token_sent_as_bearer() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer s3cret")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":12}"#)
            .create_async()
            .await;

        let config = RpcConfig {
            url: server.url(),
            auth_token: Some("s3cret".to_string()),
            ..RpcConfig::default()
        };
        let client = RpcClient::new(&config).unwrap();
        assert_eq!(client.get_latest_reference_slot().await.unwrap(), 12);
    }
}
