//! Content records: one topic's full educational payload.

use serde::{Deserialize, Serialize};

/// A single knowledge topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentRecord {
    /// Stable identifier used for lookup (unique within a store)
    pub id: String,

    /// Display title
    pub title: String,

    /// Free-text description of the topic
    pub overview: String,

    /// Illustrative examples, in presentation order
    #[serde(default)]
    pub examples: Vec<Example>,

    /// Situations where the topic applies
    #[serde(default)]
    pub use_cases: Vec<String>,

    /// Core points to remember
    #[serde(default)]
    pub key_points: Vec<String>,

    /// Caveats and pitfalls
    #[serde(default)]
    pub notes: Vec<String>,

    /// Practical advice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_tip: Option<String>,
}

impl ContentRecord {
    /// Create a record with only the required fields set
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        overview: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            overview: overview.into(),
            examples: Vec::new(),
            use_cases: Vec::new(),
            key_points: Vec::new(),
            notes: Vec::new(),
            practice_tip: None,
        }
    }

    /// Add an example
    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    /// Add a use case
    pub fn with_use_case(mut self, use_case: impl Into<String>) -> Self {
        self.use_cases.push(use_case.into());
        self
    }

    /// Add a key point
    pub fn with_key_point(mut self, point: impl Into<String>) -> Self {
        self.key_points.push(point.into());
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Set the practice tip
    pub fn with_practice_tip(mut self, tip: impl Into<String>) -> Self {
        self.practice_tip = Some(tip.into());
        self
    }
}

/// A code sample with its explanation, owned by a [`ContentRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Example {
    /// Example heading
    pub title: String,

    /// Code body
    pub code: String,

    /// What the code demonstrates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Example {
    /// Create an example without an explanation
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            explanation: None,
        }
    }

    /// Set the explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = ContentRecord::new("var_decl", "Variables", "val vs var")
            .with_example(Example::new("Example 1", "val x = 1").with_explanation("immutable"))
            .with_key_point("prefer val")
            .with_use_case("locals")
            .with_note("const val only at top level")
            .with_practice_tip("default to val");

        assert_eq!(record.id, "var_decl");
        assert_eq!(record.examples.len(), 1);
        assert_eq!(record.examples[0].explanation.as_deref(), Some("immutable"));
        assert_eq!(record.key_points, vec!["prefer val"]);
        assert_eq!(record.practice_tip.as_deref(), Some("default to val"));
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let json = r#"{"id": "gradle", "title": "Gradle", "overview": "Build system"}"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();

        assert!(record.examples.is_empty());
        assert!(record.use_cases.is_empty());
        assert!(record.key_points.is_empty());
        assert!(record.notes.is_empty());
        assert!(record.practice_tip.is_none());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"id": "gradle", "title": "Gradle"}"#;
        assert!(serde_json::from_str::<ContentRecord>(json).is_err());
    }

    #[test]
    fn test_serialization_skips_absent_optionals() {
        let record = ContentRecord::new("a", "A", "overview")
            .with_example(Example::new("first", "code"));

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("practice_tip"));
        assert!(!json.contains("explanation"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let json = r#"{"id": "gradle", "title": "Gradle", "overview": "Build", "keyPoints": ["one"]}"#;
        assert!(serde_json::from_str::<ContentRecord>(json).is_err());

        let json = r#"{"title": "t", "code": "c", "explain": "typo"}"#;
        assert!(serde_json::from_str::<Example>(json).is_err());
    }
}
