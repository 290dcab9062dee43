//! REST emitter against a DataHub-compatible metadata service.

use std::time::Duration;

use reqwest::StatusCode;

use crate::{Emitter, MetadataChangeProposal};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;

const RESTLI_PROTOCOL_HEADER: &str = "X-RestLi-Protocol-Version";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("invalid server URL '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to encode proposal: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Sends each proposal to `{server}/aspects?action=ingestProposal` with an
/// optional bearer token. One request per proposal; no retries, no batching.
#[derive(Debug, Clone)]
pub struct RestEmitter {
    client: reqwest::Client,
    server: String,
    token: Option<String>,
}

impl RestEmitter {
    pub fn new(server: &str, token: Option<String>) -> Result<Self, EmitError> {
        let parsed = url::Url::parse(server).map_err(|source| EmitError::InvalidServerUrl {
            url: server.to_string(),
            source,
        })?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            server: parsed.as_str().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Probe `{server}/config` to verify the service is reachable and the
    /// token, if any, is accepted.
    pub async fn check_connection(&self) -> Result<(), EmitError> {
        let url = format!("{}/config", self.server);
        let response = self.authorized(self.client.get(&url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            return Err(EmitError::Status { status, body });
        }

        tracing::info!(server = %self.server, "Catalog connection verified");
        Ok(())
    }
}

impl Emitter for RestEmitter {
    async fn emit(&self, proposal: &MetadataChangeProposal) -> Result<(), EmitError> {
        let body = proposal.to_wire()?;
        let url = format!("{}/aspects?action=ingestProposal", self.server);

        let response = self
            .authorized(self.client.post(&url))
            .header(RESTLI_PROTOCOL_HEADER, RESTLI_PROTOCOL_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            return Err(EmitError::Status { status, body });
        }

        tracing::debug!(
            entity_urn = proposal.entity_urn(),
            aspect = proposal.aspect_name(),
            "Proposal emitted"
        );
        Ok(())
    }
}

async fn read_capped_error_body(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    while let Ok(Some(chunk)) = response.chunk().await {
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

#[cfg(test)]
mod integration_tests {
    use super::{EmitError, RestEmitter};
    use crate::{Emitter, GlossaryNodeInfo, GlossaryTermInfo, MetadataChangeProposal};
    use std::collections::BTreeMap;
    use termlift_types::{NodeUrn, TermUrn};
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn node_proposal() -> MetadataChangeProposal {
        let urn = NodeUrn::new("dbt_metrics").unwrap();
        MetadataChangeProposal::node(
            &urn,
            GlossaryNodeInfo {
                definition: "dbt metrics ingested from dbt project".to_string(),
                name: "dbt_metrics".to_string(),
                parent_node: None,
            },
        )
    }

    fn term_proposal() -> MetadataChangeProposal {
        let urn = TermUrn::new("dbt_metrics.Finance.revenue").unwrap();
        MetadataChangeProposal::term(
            &urn,
            GlossaryTermInfo {
                definition: "Total revenue".to_string(),
                name: "Revenue".to_string(),
                term_source: "dbt".to_string(),
                parent_node: Some(NodeUrn::new("dbt_metrics.Finance").unwrap()),
                custom_properties: BTreeMap::new(),
            },
        )
    }

    #[tokio::test]
    async fn emits_proposal_to_ingest_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aspects"))
            .and(query_param("action", "ingestProposal"))
            .and(header("X-RestLi-Protocol-Version", "2.0.0"))
            .and(body_partial_json(serde_json::json!({
                "proposal": {
                    "entityType": "glossaryNode",
                    "entityUrn": "urn:li:glossaryNode:dbt_metrics",
                    "changeType": "UPSERT",
                    "aspectName": "glossaryNodeInfo"
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let emitter = RestEmitter::new(&server.uri(), None).unwrap();
        emitter.emit(&node_proposal()).await.unwrap();
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aspects"))
            .and(header("authorization", "Bearer sekret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let emitter = RestEmitter::new(&server.uri(), Some("sekret".to_string())).unwrap();
        emitter.emit(&term_proposal()).await.unwrap();
    }

    #[tokio::test]
    async fn blank_token_is_not_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aspects"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let emitter = RestEmitter::new(&server.uri(), Some("  ".to_string())).unwrap();
        emitter.emit(&node_proposal()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn error_status_carries_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aspects"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string("token expired"),
            )
            .mount(&server)
            .await;

        let emitter = RestEmitter::new(&server.uri(), Some("stale".to_string())).unwrap();
        let err = emitter.emit(&term_proposal()).await.unwrap_err();

        match err {
            EmitError::Status { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(body, "token expired");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn trailing_slash_in_server_is_normalized() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aspects"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let emitter = RestEmitter::new(&format!("{}/", server.uri()), None).unwrap();
        emitter.emit(&node_proposal()).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_server_url_is_rejected() {
        let err = RestEmitter::new("not a url", None).unwrap_err();
        assert!(matches!(err, EmitError::InvalidServerUrl { .. }));
    }

    #[tokio::test]
    async fn check_connection_probes_config() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "noCode": "true"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let emitter = RestEmitter::new(&server.uri(), None).unwrap();
        emitter.check_connection().await.unwrap();
    }

    #[tokio::test]
    async fn check_connection_surfaces_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let emitter = RestEmitter::new(&server.uri(), Some("bad".to_string())).unwrap();
        let err = emitter.check_connection().await.unwrap_err();
        assert!(matches!(err, EmitError::Status { status, .. } if status.as_u16() == 403));
    }
}
