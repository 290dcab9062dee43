//! Catalog emission for termlift.
//!
//! # Architecture
//!
//! The crate is organized around a single seam, the [`Emitter`] trait:
//!
//! - [`RestEmitter`] - POSTs each [`MetadataChangeProposal`] to a
//!   DataHub-compatible metadata service (`/aspects?action=ingestProposal`)
//! - [`DryRunEmitter`] - logs and counts proposals; nothing leaves the
//!   process
//!
//! The ingest pipeline is generic over the trait, so tests can substitute a
//! recording implementation and dry-run mode costs nothing.
//!
//! # Error Handling
//!
//! [`EmitError`] distinguishes transport failures from HTTP error statuses;
//! error statuses carry a size-capped copy of the response body for
//! diagnostics. There is no retry machinery here: each proposal is sent
//! exactly once.

mod aspect;
mod rest;

use std::sync::atomic::{AtomicUsize, Ordering};

pub use aspect::{Aspect, GlossaryNodeInfo, GlossaryTermInfo, MetadataChangeProposal};
pub use rest::{EmitError, RestEmitter};

/// Destination for metadata change proposals.
#[allow(async_fn_in_trait)]
pub trait Emitter {
    async fn emit(&self, proposal: &MetadataChangeProposal) -> Result<(), EmitError>;
}

/// Emitter that records nothing and sends nothing.
///
/// Each proposal is logged at debug level and counted, so the caller can
/// report what a real run would have done.
#[derive(Debug, Default)]
pub struct DryRunEmitter {
    skipped: AtomicUsize,
}

impl DryRunEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of proposals that would have been emitted.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }
}

impl Emitter for DryRunEmitter {
    async fn emit(&self, proposal: &MetadataChangeProposal) -> Result<(), EmitError> {
        self.skipped.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            entity_urn = proposal.entity_urn(),
            aspect = proposal.aspect_name(),
            "Dry run: proposal not emitted"
        );
        Ok(())
    }
}
