//! Full pipeline against a mock metadata service.

use termlift_emitter::RestEmitter;
use termlift_ingest::{IngestOptions, ingest_metrics};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::sample_manifest;

#[tokio::test]
async fn every_proposal_reaches_the_ingest_endpoint() {
    let server = MockServer::start().await;

    // 4 glossary nodes + 3 terms.
    Mock::given(method("POST"))
        .and(path("/aspects"))
        .and(query_param("action", "ingestProposal"))
        .respond_with(ResponseTemplate::new(200))
        .expect(7)
        .mount(&server)
        .await;

    let manifest = sample_manifest();
    let emitter = RestEmitter::new(&server.uri(), Some("test-token".to_string())).unwrap();
    let report = ingest_metrics(&manifest, &IngestOptions::default(), &emitter)
        .await
        .unwrap();

    assert_eq!(report.terms_emitted, 3);
    assert!(report.is_clean());

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .all(|r| r.headers.get("authorization").is_some())
    );
}

#[tokio::test]
async fn server_errors_on_terms_are_collected_not_fatal() {
    let server = MockServer::start().await;
    let term_marker = "glossaryTerm";

    Mock::given(method("POST"))
        .and(path("/aspects"))
        .respond_with(move |req: &wiremock::Request| {
            let body = String::from_utf8_lossy(&req.body);
            if body.contains(term_marker) {
                ResponseTemplate::new(500).set_body_string("storage unavailable")
            } else {
                ResponseTemplate::new(200)
            }
        })
        .mount(&server)
        .await;

    let manifest = sample_manifest();
    let emitter = RestEmitter::new(&server.uri(), None).unwrap();
    let report = ingest_metrics(&manifest, &IngestOptions::default(), &emitter)
        .await
        .unwrap();

    assert_eq!(report.nodes_emitted, 4);
    assert_eq!(report.terms_emitted, 0);
    assert_eq!(report.failures.len(), 3);
    assert!(
        report
            .failures
            .iter()
            .all(|f| f.reason.contains("storage unavailable"))
    );
}
