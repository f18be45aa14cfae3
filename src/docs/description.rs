use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    #[default]
    None,
    Markdown,
    Mermaid,
}

/// Human-readable docs attached to a type, field or enum value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DescriptionInfo {
    pub doc_string: String,
    #[serde(default)]
    pub markup: Markup,
}

impl DescriptionInfo {
    pub fn new(doc_string: impl Into<String>, markup: Markup) -> Self {
        Self { doc_string: doc_string.into(), markup }
    }

    pub fn plain(doc_string: impl Into<String>) -> Self {
        Self::new(doc_string, Markup::None)
    }
}
