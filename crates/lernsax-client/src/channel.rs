//! RPC channel.
//!
//! The channel sends one batch per round trip and hands back the raw result
//! array in server order. It interprets nothing: no count validation, no
//! shape validation, no retries. The session orchestrator owns all of that.

use async_trait::async_trait;
use serde_json::Value;

use lernsax_protocol::Call;

/// Errors surfaced by the RPC channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not a JSON array of results.
    #[error("malformed response body: {message}")]
    Decode {
        /// Failure description.
        message: String,
    },
}

/// Transport seam for the JSON-RPC batch endpoint.
#[async_trait]
pub trait RpcChannel: Send + Sync {
    /// Send a batch; return the raw results in server order.
    async fn send(&self, batch: &[Call]) -> Result<Vec<Value>, ChannelError>;
}

/// JSON-RPC batch channel over HTTP POST.
pub struct HttpChannel {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpChannel {
    /// Create a channel posting to `endpoint` with a shared HTTP client.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }
}

#[async_trait]
impl RpcChannel for HttpChannel {
    #[tracing::instrument(skip_all)]
    async fn send(&self, batch: &[Call]) -> Result<Vec<Value>, ChannelError> {
        tracing::debug!(calls = batch.len(), "sending batch");
        let body: Value = self
            .http
            .post(&self.endpoint)
            .json(batch)
            .send()
            .await?
            .json()
            .await?;

        match body {
            Value::Array(results) => Ok(results),
            other => Err(ChannelError::Decode {
                message: format!("expected a result array, got {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn send_posts_batch_and_returns_results_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jsonrpc.php"))
            .and(body_partial_json(json!([
                { "id": 1, "jsonrpc": "2.0", "method": "set_session" }
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "result": { "return": "OK" } },
                { "id": 2, "result": { "return": "OK" } }
            ])))
            .mount(&server)
            .await;

        let channel = HttpChannel::new(
            format!("{}/jsonrpc.php", server.uri()),
            reqwest::Client::new(),
        );
        let batch = vec![lernsax_protocol::set_session(1, "tok")];
        let results = channel.send(&batch).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], 1);
        assert_eq!(results[1]["id"], 2);
    }

    #[tokio::test]
    async fn non_array_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "maintenance" })),
            )
            .mount(&server)
            .await;

        let channel = HttpChannel::new(
            format!("{}/jsonrpc.php", server.uri()),
            reqwest::Client::new(),
        );
        let err = channel
            .send(&[lernsax_protocol::set_session(1, "tok")])
            .await
            .unwrap_err();

        assert!(matches!(err, ChannelError::Decode { .. }));
    }

    #[tokio::test]
    async fn connection_failure_surfaces_http_error() {
        // Nothing listens on this port.
        let channel = HttpChannel::new("http://127.0.0.1:1/jsonrpc.php", reqwest::Client::new());
        let err = channel
            .send(&[lernsax_protocol::set_session(1, "tok")])
            .await
            .unwrap_err();

        assert!(matches!(err, ChannelError::Http(_)));
    }
}
