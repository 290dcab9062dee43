//! Typed URN construction for catalog entities.
//!
//! URNs follow the `urn:li:` grammar used by DataHub's metadata service.
//! Each newtype validates its components at construction time, so a URN
//! value that exists is always well-formed on the wire.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::Environment;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrnError {
    #[error("{kind} URN requires a non-empty {component}")]
    EmptyComponent {
        kind: &'static str,
        component: &'static str,
    },
}

fn require_non_blank(
    kind: &'static str,
    component: &'static str,
    value: &str,
) -> Result<(), UrnError> {
    if value.trim().is_empty() {
        Err(UrnError::EmptyComponent { kind, component })
    } else {
        Ok(())
    }
}

/// URN of a glossary term: `urn:li:glossaryTerm:{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TermUrn(String);

impl TermUrn {
    pub fn new(name: &str) -> Result<Self, UrnError> {
        require_non_blank("glossary term", "name", name)?;
        Ok(Self(format!("urn:li:glossaryTerm:{name}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URN of a glossary node: `urn:li:glossaryNode:{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeUrn(String);

impl NodeUrn {
    pub fn new(name: &str) -> Result<Self, UrnError> {
        require_non_blank("glossary node", "name", name)?;
        Ok(Self(format!("urn:li:glossaryNode:{name}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URN of a dataset:
/// `urn:li:dataset:(urn:li:dataPlatform:{platform},{name},{env})`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DatasetUrn(String);

impl DatasetUrn {
    pub fn new(platform: &str, name: &str, env: Environment) -> Result<Self, UrnError> {
        require_non_blank("dataset", "platform", platform)?;
        require_non_blank("dataset", "name", name)?;
        Ok(Self(format!(
            "urn:li:dataset:(urn:li:dataPlatform:{platform},{name},{env})",
            env = env.as_str()
        )))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
