//! Navigation outline: sections of topics that point at content records.
//!
//! Each module groups its topics into sections. A section item's `id` is the
//! id of the record holding its detail, when one has been written.

use serde::{Deserialize, Serialize};

/// A group of related topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Topics in display order
    #[serde(default)]
    pub items: Vec<SectionItem>,
}

impl Section {
    /// Create an empty section
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            items: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an item
    pub fn with_item(mut self, item: SectionItem) -> Self {
        self.items.push(item);
        self
    }
}

/// A single topic entry in a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionItem {
    /// Record id this item links to
    pub id: String,

    /// Short display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Study progress marker
    #[serde(default)]
    pub completed: bool,
}

impl SectionItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            completed: false,
        }
    }

    /// Mark the topic as studied
    pub fn mark_completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
