//! Lenient serde model of `manifest.json`.
//!
//! Only the fields this tool reads are modeled. dbt changes the manifest
//! shape between releases (metrics moved from `calculation_method` to
//! semantic-layer types in 1.6), so every field that can be absent defaults
//! instead of failing the whole parse. The `nodes` map also contains tests,
//! seeds and snapshots whose extra fields are simply ignored.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use termlift_types::CategoryPath;

/// Metric `meta` key that assigns a glossary category.
pub const META_CATEGORY_KEY: &str = "datahub_glossary_category";

#[derive(Debug, Default, Deserialize)]
pub struct DbtManifest {
    #[serde(default)]
    pub metadata: ManifestMetadata,
    #[serde(default)]
    pub metrics: BTreeMap<String, Metric>,
    #[serde(default)]
    pub nodes: BTreeMap<String, ModelNode>,
    #[serde(default)]
    pub sources: BTreeMap<String, SourceNode>,
    #[serde(default)]
    pub semantic_models: BTreeMap<String, SemanticModel>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ManifestMetadata {
    #[serde(default)]
    pub dbt_version: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
}

/// A metric entry. The metric's unique id is its key in the `metrics` map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Metric type: simple, ratio, derived, cumulative.
    #[serde(default, rename = "type")]
    pub metric_type: Option<String>,
    #[serde(default)]
    pub calculation_method: Option<String>,
    #[serde(default)]
    pub expression: Option<String>,
    /// Filter clauses, kept opaque.
    #[serde(default)]
    pub filters: Vec<Value>,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub time_grains: Vec<String>,
    #[serde(default)]
    pub depends_on: DependsOn,
    #[serde(default)]
    pub meta: BTreeMap<String, Value>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub path: String,
}

impl Metric {
    /// Glossary category from `meta.datahub_glossary_category`, defaulting
    /// to the uncategorized bucket.
    #[must_use]
    pub fn glossary_category(&self) -> CategoryPath {
        self.meta
            .get(META_CATEGORY_KEY)
            .and_then(Value::as_str)
            .map(CategoryPath::new)
            .unwrap_or_else(CategoryPath::uncategorized)
    }

    /// The name shown in the catalog: the label when set, otherwise the
    /// metric name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependsOn {
    #[serde(default)]
    pub nodes: Vec<String>,
}

/// A model entry from `nodes`. Tests/seeds/snapshots also live in `nodes`;
/// for those the fields below simply come up empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelNode {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl ModelNode {
    /// The relation identifier in the warehouse: alias when set, else name.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceNode {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub identifier: Option<String>,
}

impl SourceNode {
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.identifier
            .as_deref()
            .filter(|i| !i.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// A semantic model entry (dbt 1.6+). Metrics in newer projects depend on
/// semantic models rather than directly on model nodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemanticModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Reference to the underlying model, written as `ref('orders')`.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dimensions: Vec<Value>,
    #[serde(default)]
    pub measures: Vec<Value>,
    #[serde(default)]
    pub entities: Vec<Value>,
    #[serde(default)]
    pub meta: BTreeMap<String, Value>,
}

impl SemanticModel {
    /// The model name inside the `ref('...')` expression, if parseable.
    #[must_use]
    pub fn ref_target(&self) -> Option<&str> {
        let model = self.model.as_deref()?;
        let inner = model.trim().strip_prefix("ref(")?.strip_suffix(')')?;
        let inner = inner.trim().trim_matches('\'').trim_matches('"');
        if inner.is_empty() { None } else { Some(inner) }
    }
}
