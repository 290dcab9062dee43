//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use termlift_emitter::{EmitError, Emitter, MetadataChangeProposal};
use termlift_manifest::DbtManifest;

/// A dbt 1.6 manifest with metrics depending on a model, a source, a
/// semantic model, and one unknown node.
pub const SAMPLE_MANIFEST: &str = include_str!("../fixtures/sample_manifest.json");

pub fn sample_manifest() -> DbtManifest {
    serde_json::from_str(SAMPLE_MANIFEST).expect("fixture manifest parses")
}

/// Emitter that captures every proposal for assertions.
#[derive(Default)]
pub struct RecordingEmitter {
    proposals: Mutex<Vec<MetadataChangeProposal>>,
}

impl RecordingEmitter {
    pub fn proposals(&self) -> Vec<MetadataChangeProposal> {
        self.proposals.lock().unwrap().clone()
    }

    pub fn urns(&self) -> Vec<String> {
        self.proposals()
            .iter()
            .map(|p| p.entity_urn().to_string())
            .collect()
    }
}

impl Emitter for RecordingEmitter {
    async fn emit(&self, proposal: &MetadataChangeProposal) -> Result<(), EmitError> {
        self.proposals.lock().unwrap().push(proposal.clone());
        Ok(())
    }
}
