//! The termlift ingestion pipeline.
//!
//! A single pass over the manifest: emit the glossary node hierarchy, then
//! one glossary term per metric, through whatever [`Emitter`] the caller
//! provides. Hierarchy failures abort the run; a failure on an individual
//! metric is logged, recorded in the report, and does not stop the others.

mod glossary;
mod report;
mod terms;

use termlift_emitter::{EmitError, Emitter};
use termlift_manifest::DbtManifest;
use termlift_types::{Environment, UrnError};
use thiserror::Error;

pub use report::{IngestReport, MetricFailure};

/// Knobs of one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Platform component of upstream dataset URNs.
    pub platform: String,
    /// Fabric component of upstream dataset URNs.
    pub env: Environment,
    /// Name of the root glossary node everything is parented under.
    pub glossary_root: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            platform: "dbt".to_string(),
            env: Environment::default(),
            glossary_root: "dbt_metrics".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to create glossary hierarchy: {0}")]
    Hierarchy(#[source] EmitError),
    #[error(transparent)]
    Urn(#[from] UrnError),
}

/// Run the pipeline: glossary hierarchy first, then one term per metric.
pub async fn ingest_metrics<E: Emitter>(
    manifest: &DbtManifest,
    options: &IngestOptions,
    emitter: &E,
) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport {
        metrics_found: manifest.metrics.len(),
        ..Default::default()
    };

    tracing::info!(metrics = report.metrics_found, "Starting metrics ingestion");

    if manifest.metrics.is_empty() {
        tracing::warn!("No metrics found in manifest; nothing to ingest");
        return Ok(report);
    }

    let categories = glossary::create_glossary_hierarchy(&manifest.metrics, options, emitter).await?;
    report.nodes_emitted = categories.len() + 1;

    for (unique_id, metric) in &manifest.metrics {
        if metric.name.trim().is_empty() {
            tracing::warn!(unique_id = %unique_id, "Skipping metric without a name");
            report.failures.push(MetricFailure {
                metric: unique_id.clone(),
                reason: "metric record has no name".to_string(),
            });
            continue;
        }

        let build = match terms::build_term_proposal(unique_id, metric, manifest, options, &categories)
        {
            Ok(build) => build,
            Err(e) => {
                tracing::error!(metric = %metric.name, error = %e, "Failed to build glossary term");
                report.failures.push(MetricFailure {
                    metric: metric.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        report.unresolved_dependencies += build.unresolved;

        match emitter.emit(&build.proposal).await {
            Ok(()) => {
                report.terms_emitted += 1;
                tracing::info!(metric = %metric.name, urn = %build.urn, "Emitted metric as glossary term");
            }
            Err(e) => {
                tracing::error!(metric = %metric.name, error = %e, "Failed to emit metric");
                report.failures.push(MetricFailure {
                    metric: metric.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        terms = report.terms_emitted,
        nodes = report.nodes_emitted,
        failures = report.failures.len(),
        "Ingestion finished"
    );
    Ok(report)
}
