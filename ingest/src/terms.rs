//! Mapping of one metric to a glossary term proposal.

use std::collections::BTreeMap;

use serde_json::Value;
use termlift_emitter::{GlossaryTermInfo, MetadataChangeProposal};
use termlift_manifest::{DbtManifest, META_CATEGORY_KEY, Metric, resolve_dataset_name};
use termlift_types::{DatasetUrn, NodeUrn, TermUrn, UrnError};

use crate::IngestOptions;

pub(crate) struct TermBuild {
    pub urn: TermUrn,
    pub proposal: MetadataChangeProposal,
    /// Dependencies that did not resolve to a known dataset.
    pub unresolved: usize,
}

/// Build the glossary term proposal for one metric.
///
/// Glossary terms carry no first-class lineage aspect, so the resolved
/// upstream dataset URNs land in the `upstream_datasets` custom property.
pub(crate) fn build_term_proposal(
    unique_id: &str,
    metric: &Metric,
    manifest: &DbtManifest,
    options: &IngestOptions,
    categories: &BTreeMap<String, NodeUrn>,
) -> Result<TermBuild, UrnError> {
    let category = metric.glossary_category();
    let urn = TermUrn::new(&format!(
        "{root}.{path}.{name}",
        root = options.glossary_root,
        path = category.dotted(),
        name = metric.name
    ))?;

    let mut props = BTreeMap::new();
    props.insert("dbt_unique_id".to_string(), unique_id.to_string());
    props.insert("dbt_package".to_string(), metric.package_name.clone());
    props.insert("dbt_path".to_string(), metric.path.clone());

    if let Some(metric_type) = &metric.metric_type {
        props.insert("metric_type".to_string(), metric_type.clone());
    }
    if let Some(method) = &metric.calculation_method {
        props.insert("calculation_method".to_string(), method.clone());
    }
    if let Some(expression) = &metric.expression {
        props.insert("expression".to_string(), expression.clone());
    }
    if !metric.dimensions.is_empty() {
        props.insert("dimensions".to_string(), metric.dimensions.join(", "));
    }
    if !metric.time_grains.is_empty() {
        props.insert("time_grains".to_string(), metric.time_grains.join(", "));
    }
    if !metric.filters.is_empty()
        && let Ok(filters) = serde_json::to_string(&metric.filters)
    {
        props.insert("filters".to_string(), filters);
    }
    if !metric.tags.is_empty() {
        props.insert("tags".to_string(), metric.tags.join(", "));
    }

    let mut upstream = Vec::new();
    let mut unresolved = 0usize;
    for dep in &metric.depends_on.nodes {
        match resolve_dataset_name(manifest, dep) {
            Some(name) => {
                let dataset = DatasetUrn::new(&options.platform, &name, options.env)?;
                upstream.push(dataset.as_str().to_string());
            }
            None => unresolved += 1,
        }
    }
    if !upstream.is_empty() {
        props.insert("upstream_datasets".to_string(), upstream.join(", "));
    }

    for (key, value) in &metric.meta {
        if key == META_CATEGORY_KEY {
            continue;
        }
        props.insert(format!("meta_{key}"), meta_value_to_string(value));
    }

    let definition = metric
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("dbt metric: {}", metric.name));

    let info = GlossaryTermInfo {
        definition,
        name: metric.display_name().to_string(),
        term_source: "dbt".to_string(),
        parent_node: categories.get(category.as_str()).cloned(),
        custom_properties: props,
    };

    let proposal = MetadataChangeProposal::term(&urn, info);
    Ok(TermBuild {
        urn,
        proposal,
        unresolved,
    })
}

fn meta_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
