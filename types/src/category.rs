//! Glossary category paths.
//!
//! Categories come from metric metadata and may be nested using `/` as a
//! separator (`Finance/Revenue`). Inside URN names the path is written with
//! dots; the display name of a category node is its last segment.

use std::fmt;

/// Category assigned to metrics that declare none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryPath {
    raw: String,
}

impl CategoryPath {
    /// Build a category path from raw metadata. Blank input falls back to
    /// [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let raw = if trimmed.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            trimmed.to_string()
        };
        Self { raw }
    }

    #[must_use]
    pub fn uncategorized() -> Self {
        Self::new(DEFAULT_CATEGORY)
    }

    /// The path exactly as written in metadata.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('/').filter(|s| !s.is_empty())
    }

    /// The dotted form used inside URN names: `Finance/Revenue` becomes
    /// `Finance.Revenue`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments().collect::<Vec<_>>().join(".")
    }

    /// The display name of the category node: the last path segment.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.segments().last().unwrap_or(DEFAULT_CATEGORY)
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.segments().count() > 1
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
