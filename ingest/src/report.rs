//! Ingestion run summary.

use std::fmt;

/// What one ingestion run did (or, in dry-run mode, would have done).
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Metrics present in the manifest.
    pub metrics_found: usize,
    /// Glossary nodes emitted (root plus one per category).
    pub nodes_emitted: usize,
    /// Metrics emitted as glossary terms.
    pub terms_emitted: usize,
    /// `depends_on` entries that did not resolve to a known dataset.
    pub unresolved_dependencies: usize,
    /// Metrics that could not be emitted, with the reason.
    pub failures: Vec<MetricFailure>,
}

#[derive(Debug)]
pub struct MetricFailure {
    pub metric: String,
    pub reason: String,
}

impl IngestReport {
    /// True when every metric found was emitted as a term.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} metrics emitted as glossary terms, {} glossary nodes",
            self.terms_emitted, self.metrics_found, self.nodes_emitted
        )?;
        if self.unresolved_dependencies > 0 {
            write!(f, ", {} unresolved dependencies", self.unresolved_dependencies)?;
        }
        if !self.failures.is_empty() {
            write!(f, ", {} failures", self.failures.len())?;
        }
        Ok(())
    }
}
