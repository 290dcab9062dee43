//! dbt manifest loading for termlift.
//!
//! # Architecture
//!
//! - [`schema`] - lenient serde model of the subset of `manifest.json` the
//!   tool reads: metrics, model nodes, sources, and semantic models
//! - [`resolve`] - mapping of dbt node ids from `depends_on` to physical
//!   dataset names
//! - [`load_manifest`] - file loader with path-carrying errors
//!
//! The manifest is treated as data, not as a contract: collections default
//! to empty, unknown fields are ignored, and malformed individual records
//! surface as parse errors only when they cannot be represented at all.
//! Schema validation is deliberately out of scope.

mod resolve;
mod schema;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use resolve::resolve_dataset_name;
pub use schema::{
    DbtManifest, DependsOn, ManifestMetadata, Metric, ModelNode, SemanticModel, SourceNode,
    META_CATEGORY_KEY,
};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and parse a dbt `manifest.json`.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<DbtManifest, ManifestError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading manifest");

    let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: DbtManifest =
        serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        metrics = manifest.metrics.len(),
        semantic_models = manifest.semantic_models.len(),
        dbt_version = manifest.metadata.dbt_version.as_deref().unwrap_or("unknown"),
        "Manifest loaded"
    );

    Ok(manifest)
}
