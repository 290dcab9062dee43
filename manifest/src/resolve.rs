//! Resolution of dbt node ids to physical dataset names.
//!
//! A metric's `depends_on.nodes` entries are dbt unique ids
//! (`model.project.orders`, `source.project.raw.payments`,
//! `semantic_model.project.orders`). The catalog records lineage against the
//! warehouse relation, so each id is mapped to `database.schema.identifier`
//! in lowercase. Semantic models resolve through their `ref('...')` target.

use crate::schema::{DbtManifest, ModelNode};

/// Resolve a dbt node id to the lowercased physical dataset name, or `None`
/// when the id is unknown to the manifest.
#[must_use]
pub fn resolve_dataset_name(manifest: &DbtManifest, node_id: &str) -> Option<String> {
    if let Some(node) = manifest.nodes.get(node_id) {
        return Some(dataset_name(
            node.database.as_deref(),
            node.schema.as_deref(),
            node.identifier(),
        ));
    }

    if let Some(source) = manifest.sources.get(node_id) {
        return Some(dataset_name(
            source.database.as_deref(),
            source.schema.as_deref(),
            source.identifier(),
        ));
    }

    if let Some(sm) = manifest.semantic_models.get(node_id) {
        if let Some(target) = sm.ref_target()
            && let Some(node) = find_model_by_name(manifest, target)
        {
            return Some(dataset_name(
                node.database.as_deref(),
                node.schema.as_deref(),
                node.identifier(),
            ));
        }
        tracing::warn!(
            node_id,
            model = sm.model.as_deref().unwrap_or(""),
            "Semantic model does not resolve to a known model"
        );
        return None;
    }

    tracing::warn!(node_id, "Could not resolve node to a dataset");
    None
}

fn find_model_by_name<'a>(manifest: &'a DbtManifest, name: &str) -> Option<&'a ModelNode> {
    manifest.nodes.values().find(|node| node.name == name)
}

fn dataset_name(database: Option<&str>, schema: Option<&str>, identifier: &str) -> String {
    [database.unwrap_or(""), schema.unwrap_or(""), identifier]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(".")
}
