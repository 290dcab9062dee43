//! End-to-end pipeline tests over the fixture manifest: load, map, emit
//! through a recording emitter, and check what would land in the catalog.

use std::io::Write;

use termlift_ingest::{IngestOptions, ingest_metrics};
use termlift_manifest::load_manifest;
use termlift_types::Environment;

use crate::common::{RecordingEmitter, SAMPLE_MANIFEST, sample_manifest};

#[tokio::test]
async fn fixture_manifest_round_trips_through_the_pipeline() {
    let manifest = sample_manifest();
    let emitter = RecordingEmitter::default();

    let report = ingest_metrics(&manifest, &IngestOptions::default(), &emitter)
        .await
        .unwrap();

    assert_eq!(report.metrics_found, 3);
    assert_eq!(report.terms_emitted, 3);
    // Root + Finance/Revenue + Product + Uncategorized.
    assert_eq!(report.nodes_emitted, 4);
    // model.analytics.ghost has no manifest entry.
    assert_eq!(report.unresolved_dependencies, 1);
    assert!(report.is_clean());

    let urns = emitter.urns();
    assert_eq!(urns.len(), 7);
    assert_eq!(urns[0], "urn:li:glossaryNode:dbt_metrics");
    assert!(urns.contains(&"urn:li:glossaryNode:dbt_metrics.Finance.Revenue".to_string()));
    assert!(urns.contains(&"urn:li:glossaryTerm:dbt_metrics.Product.active_users".to_string()));
    assert!(
        urns.contains(&"urn:li:glossaryTerm:dbt_metrics.Uncategorized.orders_count".to_string())
    );
}

#[tokio::test]
async fn lineage_reaches_through_sources_and_semantic_models() {
    let manifest = sample_manifest();
    let emitter = RecordingEmitter::default();

    ingest_metrics(&manifest, &IngestOptions::default(), &emitter)
        .await
        .unwrap();

    let find_props = |urn_suffix: &str| {
        let proposal = emitter
            .proposals()
            .into_iter()
            .find(|p| p.entity_urn().ends_with(urn_suffix))
            .expect("term proposal present");
        let wire = proposal.to_wire().unwrap();
        let aspect: serde_json::Value =
            serde_json::from_str(wire["proposal"]["aspect"]["value"].as_str().unwrap()).unwrap();
        aspect["customProperties"].clone()
    };

    // Semantic model dependency resolves through ref('fct_sessions'), whose
    // alias is "sessions".
    let props = find_props("Product.active_users");
    assert_eq!(
        props["upstream_datasets"],
        "urn:li:dataset:(urn:li:dataPlatform:dbt,analytics.marts.sessions,PROD)"
    );

    // Source dependency resolves via its identifier; the unknown model is
    // dropped from lineage rather than failing the metric.
    let props = find_props("Uncategorized.orders_count");
    assert_eq!(
        props["upstream_datasets"],
        "urn:li:dataset:(urn:li:dataPlatform:dbt,raw.shop.orders_v2,PROD)"
    );
}

#[tokio::test]
async fn options_flow_into_urns() {
    let manifest = sample_manifest();
    let emitter = RecordingEmitter::default();
    let options = IngestOptions {
        platform: "snowflake".to_string(),
        env: Environment::Dev,
        glossary_root: "business_metrics".to_string(),
    };

    ingest_metrics(&manifest, &options, &emitter).await.unwrap();

    let urns = emitter.urns();
    assert_eq!(urns[0], "urn:li:glossaryNode:business_metrics");
    assert!(
        urns.contains(&"urn:li:glossaryTerm:business_metrics.Finance.Revenue.revenue".to_string())
    );

    let revenue = emitter
        .proposals()
        .into_iter()
        .find(|p| p.entity_urn().ends_with("Revenue.revenue"))
        .unwrap();
    let wire = revenue.to_wire().unwrap();
    let aspect: serde_json::Value =
        serde_json::from_str(wire["proposal"]["aspect"]["value"].as_str().unwrap()).unwrap();
    assert_eq!(
        aspect["customProperties"]["upstream_datasets"],
        "urn:li:dataset:(urn:li:dataPlatform:snowflake,analytics.marts.fct_orders,DEV)"
    );
}

#[tokio::test]
async fn manifest_loads_from_disk_and_ingests() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_MANIFEST.as_bytes()).unwrap();

    let manifest = load_manifest(file.path()).unwrap();
    let emitter = RecordingEmitter::default();
    let report = ingest_metrics(&manifest, &IngestOptions::default(), &emitter)
        .await
        .unwrap();

    assert_eq!(report.terms_emitted, 3);
}
