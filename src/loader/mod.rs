//! Loading the dataset from declarative data files.
//!
//! The store itself never parses anything. This module discovers data files
//! in a directory, parses them, and feeds the records into a
//! [`StoreBuilder`] in a deterministic order.
//!
//! # Layout
//!
//! ```text
//! data/
//! ├── android.yaml    # module "android" (file stem unless `module:` is set)
//! └── kotlin.yaml     # module "kotlin"
//! ```
//!
//! Files are loaded sorted by path, so record order is file order first,
//! then authoring order inside each file.

pub mod data_file;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::store::{ContentStore, StoreBuilder, StoreError};

pub use data_file::{DataFile, DataFileError, DataFormat, SUPPORTED_VERSION};

/// Glob patterns used when none are configured
pub const DEFAULT_PATTERNS: &[&str] = &["*.json", "*.yaml", "*.yml"];

/// Owned copy of [`DEFAULT_PATTERNS`]
pub fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Errors that can occur while loading a dataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data directory does not exist: {0}")]
    MissingDir(PathBuf),

    #[error("No data files matching {patterns:?} in {dir}")]
    NoDataFiles { dir: PathBuf, patterns: Vec<String> },

    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Unsupported data file extension: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: DataFileError,
    },

    #[error("Invalid data in {path}: {source}")]
    Store { path: PathBuf, source: StoreError },
}

/// A fully built store plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// The read-only store
    pub store: ContentStore,

    /// Data files in load order
    pub files: Vec<PathBuf>,

    /// Digest of file names and contents (16 hex chars)
    pub revision: String,
}

/// Find data files in `dir` matching any of `patterns`, sorted by path
pub fn discover(dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, LoadError> {
    let base = Pattern::escape(&dir.to_string_lossy());
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let full = Path::new(&base).join(pattern);
        let entries = glob::glob(&full.to_string_lossy()).map_err(|source| LoadError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path: {}", e),
            }
        }
    }

    Ok(files.into_iter().collect())
}

/// Read and parse one data file
pub async fn read_data_file(path: &Path) -> Result<DataFile, LoadError> {
    let (_, data) = read_with_text(path).await?;
    Ok(data)
}

async fn read_with_text(path: &Path) -> Result<(String, DataFile), LoadError> {
    let format =
        DataFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    let text = fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let data = DataFile::parse(&text, format).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((text, data))
}

/// Load every data file in `dir` into a single store
///
/// Fails on the first unreadable file, parse error, or duplicate id.
pub async fn load_dir(dir: &Path, patterns: &[String]) -> Result<LoadedDataset, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDir(dir.to_path_buf()));
    }

    let files = discover(dir, patterns)?;
    if files.is_empty() {
        return Err(LoadError::NoDataFiles {
            dir: dir.to_path_buf(),
            patterns: patterns.to_vec(),
        });
    }

    let mut builder = StoreBuilder::new();
    let mut hasher = Sha256::new();

    for path in &files {
        let (text, data) = read_with_text(path).await?;
        let module = data.module_name(path);

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        hasher.update(file_name.as_bytes());
        hasher.update([0u8]);
        hasher.update(text.as_bytes());

        debug!(
            file = %path.display(),
            module = %module,
            records = data.records.len(),
            sections = data.sections.len(),
            "Parsed data file"
        );

        builder = builder
            .with_sections(&module, data.sections)
            .and_then(|b| b.with_records(&module, data.records))
            .map_err(|source| LoadError::Store {
                path: path.clone(),
                source,
            })?;
    }

    let revision = hex::encode(&hasher.finalize()[..8]);
    let store = builder.build();

    info!(
        records = store.len(),
        files = files.len(),
        revision = %revision,
        "Dataset loaded"
    );

    Ok(LoadedDataset {
        store,
        files,
        revision,
    })
}
