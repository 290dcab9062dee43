//! Glossary aspects and the metadata change proposal envelope.
//!
//! Aspects serialize camelCase to match the catalog's schema. On the wire a
//! proposal embeds its aspect as a JSON string value with an explicit
//! content type, inside the GMS `ingestProposal` envelope.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};
use termlift_types::{NodeUrn, TermUrn};

const CHANGE_TYPE_UPSERT: &str = "UPSERT";

/// `glossaryTermInfo` aspect of a glossary term.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTermInfo {
    pub definition: String,
    pub name: String,
    pub term_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_node: Option<NodeUrn>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_properties: BTreeMap<String, String>,
}

/// `glossaryNodeInfo` aspect of a glossary node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryNodeInfo {
    pub definition: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_node: Option<NodeUrn>,
}

#[derive(Debug, Clone)]
pub enum Aspect {
    GlossaryTermInfo(GlossaryTermInfo),
    GlossaryNodeInfo(GlossaryNodeInfo),
}

impl Aspect {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Aspect::GlossaryTermInfo(_) => "glossaryTermInfo",
            Aspect::GlossaryNodeInfo(_) => "glossaryNodeInfo",
        }
    }

    #[must_use]
    pub const fn entity_type(&self) -> &'static str {
        match self {
            Aspect::GlossaryTermInfo(_) => "glossaryTerm",
            Aspect::GlossaryNodeInfo(_) => "glossaryNode",
        }
    }

    fn to_json_string(&self) -> Result<String, serde_json::Error> {
        match self {
            Aspect::GlossaryTermInfo(info) => serde_json::to_string(info),
            Aspect::GlossaryNodeInfo(info) => serde_json::to_string(info),
        }
    }
}

/// One UPSERT of one aspect against one entity.
///
/// Constructors are typed per entity kind, so a term aspect cannot be paired
/// with a node URN.
#[derive(Debug, Clone)]
pub struct MetadataChangeProposal {
    entity_urn: String,
    aspect: Aspect,
}

impl MetadataChangeProposal {
    #[must_use]
    pub fn term(urn: &TermUrn, info: GlossaryTermInfo) -> Self {
        Self {
            entity_urn: urn.as_str().to_string(),
            aspect: Aspect::GlossaryTermInfo(info),
        }
    }

    #[must_use]
    pub fn node(urn: &NodeUrn, info: GlossaryNodeInfo) -> Self {
        Self {
            entity_urn: urn.as_str().to_string(),
            aspect: Aspect::GlossaryNodeInfo(info),
        }
    }

    #[must_use]
    pub fn entity_urn(&self) -> &str {
        &self.entity_urn
    }

    #[must_use]
    pub const fn aspect_name(&self) -> &'static str {
        self.aspect.name()
    }

    /// The request body for the `ingestProposal` endpoint.
    pub fn to_wire(&self) -> Result<Value, serde_json::Error> {
        Ok(json!({
            "proposal": {
                "entityType": self.aspect.entity_type(),
                "entityUrn": self.entity_urn,
                "changeType": CHANGE_TYPE_UPSERT,
                "aspectName": self.aspect.name(),
                "aspect": {
                    "contentType": "application/json",
                    "value": self.aspect.to_json_string()?,
                }
            }
        }))
    }
}
