//! Data file schema and parsing.
//!
//! A data file holds one module's records and, optionally, its outline:
//!
//! ```yaml
//! version: 1
//! module: kotlin
//! sections:
//!   - id: basic_syntax
//!     title: Basic syntax
//!     items:
//!       - id: var_decl
//!         name: val vs var
//! records:
//!   - id: var_decl
//!     title: Variable declarations
//!     overview: ...
//!     examples:
//!       - title: val and var
//!         code: |
//!           val name = "Kotlin"
//!         explanation: ...
//!     key_points: [...]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ContentRecord, Section};

/// The only schema version understood by this build
pub const SUPPORTED_VERSION: u32 = 1;

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

/// Errors from parsing a single data file
#[derive(Debug, Error)]
pub enum DataFileError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported data file version {found} (expected {})", SUPPORTED_VERSION)]
    UnsupportedVersion { found: u32 },
}

/// On-disk layout of one data file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataFile {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Module name (defaults to the file stem when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Navigation outline for this module
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Topic records in authoring order
    #[serde(default)]
    pub records: Vec<ContentRecord>,
}

impl DataFile {
    /// Parse file contents in the given format
    pub fn parse(text: &str, format: DataFormat) -> Result<Self, DataFileError> {
        let data: DataFile = match format {
            DataFormat::Json => serde_json::from_str(text)?,
            DataFormat::Yaml => serde_yaml::from_str(text)?,
        };

        if data.version != SUPPORTED_VERSION {
            return Err(DataFileError::UnsupportedVersion {
                found: data.version,
            });
        }

        Ok(data)
    }

    /// Module name, falling back to the file stem of `path`
    pub fn module_name(&self, path: &Path) -> String {
        self.module.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unnamed")
                .to_string()
        })
    }
}

/// Serialization format of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(DataFormat::Json),
            "yaml" | "yml" => Some(DataFormat::Yaml),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Json => write!(f, "json"),
            DataFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DataFormat::from_path(Path::new("data/kotlin.json")),
            Some(DataFormat::Json)
        );
        assert_eq!(
            DataFormat::from_path(Path::new("data/android.YAML")),
            Some(DataFormat::Yaml)
        );
        assert_eq!(
            DataFormat::from_path(Path::new("data/android.yml")),
            Some(DataFormat::Yaml)
        );
        assert_eq!(DataFormat::from_path(Path::new("data/readme.md")), None);
        assert_eq!(DataFormat::from_path(Path::new("data/noext")), None);
    }

    #[test]
    fn test_parse_json_keeps_order() {
        let json = r#"{
            "records": [{
                "id": "collections_ops",
                "title": "Collection operations",
                "overview": "map, filter, reduce",
                "examples": [
                    {"title": "map", "code": "list.map { it * 2 }"},
                    {"title": "filter", "code": "list.filter { it > 0 }", "explanation": "keeps positives"}
                ],
                "use_cases": ["transform", "select"],
                "key_points": ["lazy with sequences", "eager on lists"],
                "notes": ["watch allocations"]
            }]
        }"#;

        let data = DataFile::parse(json, DataFormat::Json).unwrap();
        assert_eq!(data.version, 1);
        assert!(data.module.is_none());

        let record = &data.records[0];
        let titles: Vec<&str> = record.examples.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["map", "filter"]);
        assert_eq!(record.use_cases, vec!["transform", "select"]);
        assert_eq!(record.key_points, vec!["lazy with sequences", "eager on lists"]);
    }

    #[test]
    fn test_parse_yaml_with_module() {
        let yaml = r#"
version: 1
module: android
records:
  - id: gradle
    title: Gradle
    overview: Build system
    practice_tip: Keep versions in a catalog
"#;
        let data = DataFile::parse(yaml, DataFormat::Yaml).unwrap();

        assert_eq!(data.module_name(Path::new("whatever.yaml")), "android");
        assert_eq!(
            data.records[0].practice_tip.as_deref(),
            Some("Keep versions in a catalog")
        );
    }

    #[test]
    fn test_module_name_defaults_to_file_stem() {
        let data = DataFile::parse("records: []", DataFormat::Yaml).unwrap();
        let path = PathBuf::from("/data/kotlin.yaml");

        assert_eq!(data.module_name(&path), "kotlin");
    }

    #[test]
    fn test_unsupported_version() {
        let result = DataFile::parse(r#"{"version": 2}"#, DataFormat::Json);
        assert!(matches!(
            result,
            Err(DataFileError::UnsupportedVersion { found: 2 })
        ));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            DataFile::parse("{not json", DataFormat::Json),
            Err(DataFileError::Json(_))
        ));
        assert!(matches!(
            DataFile::parse("records: [unclosed", DataFormat::Yaml),
            Err(DataFileError::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_top_level_key() {
        let result = DataFile::parse("modul: kotlin\nrecords: []", DataFormat::Yaml);
        match result {
            Err(DataFileError::Yaml(e)) => assert!(e.to_string().contains("modul")),
            other => panic!("Expected Yaml error, got {:?}", other),
        }
    }
}
