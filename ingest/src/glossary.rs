//! Glossary node hierarchy.
//!
//! One root node organizes everything this tool writes; each distinct metric
//! category becomes a child node of the root. Nested category paths keep
//! their dotted form in the URN name and show only the last segment.

use std::collections::BTreeMap;

use termlift_emitter::{Emitter, GlossaryNodeInfo, MetadataChangeProposal};
use termlift_manifest::Metric;
use termlift_types::{CategoryPath, NodeUrn};

use crate::{IngestError, IngestOptions};

const ROOT_DEFINITION: &str = "dbt metrics ingested from dbt project";

/// Emit the root node and one node per category, returning the
/// category → node URN map used to parent terms.
pub(crate) async fn create_glossary_hierarchy<E: Emitter>(
    metrics: &BTreeMap<String, Metric>,
    options: &IngestOptions,
    emitter: &E,
) -> Result<BTreeMap<String, NodeUrn>, IngestError> {
    let root_urn = NodeUrn::new(&options.glossary_root)?;
    let root_info = GlossaryNodeInfo {
        definition: ROOT_DEFINITION.to_string(),
        name: options.glossary_root.clone(),
        parent_node: None,
    };
    emitter
        .emit(&MetadataChangeProposal::node(&root_urn, root_info))
        .await
        .map_err(IngestError::Hierarchy)?;
    tracing::info!(root = %options.glossary_root, "Created glossary root node");

    let categories: BTreeMap<String, CategoryPath> = metrics
        .values()
        .map(Metric::glossary_category)
        .map(|category| (category.as_str().to_string(), category))
        .collect();

    let mut urns = BTreeMap::new();
    for (raw, category) in categories {
        let urn = NodeUrn::new(&format!(
            "{root}.{path}",
            root = options.glossary_root,
            path = category.dotted()
        ))?;
        let info = GlossaryNodeInfo {
            definition: format!("Metrics in category: {category}"),
            name: category.display_name().to_string(),
            parent_node: Some(root_urn.clone()),
        };
        emitter
            .emit(&MetadataChangeProposal::node(&urn, info))
            .await
            .map_err(IngestError::Hierarchy)?;
        tracing::info!(category = %category, "Created glossary category node");
        urns.insert(raw, urn);
    }

    Ok(urns)
}
