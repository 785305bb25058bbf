//! kbase - Read-only knowledge topic store
//!
//! Programming-language knowledge topics (overview, code examples, key
//! points, notes) kept in declarative data files and served from an
//! immutable in-memory store keyed by topic id.
//!
//! # Architecture
//!
//! - Data files are parsed once at startup by the loader
//! - The store is built in one pass and validated (ids must be unique)
//! - After that, lookups are plain reads with no locking
//!
//! # Modules
//!
//! - `domain`: Data structures (ContentRecord, Example, Section)
//! - `store`: The keyed store and its builder
//! - `loader`: Data file discovery and parsing
//! - `config`: Data location resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Show a topic
//! kbase show var_decl
//!
//! # List topics from one module
//! kbase list --module android
//!
//! # Validate a dataset
//! kbase --data ./data check
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod loader;
pub mod store;

// Re-export main types at crate root for convenience
pub use domain::{ContentRecord, Example, Section, SectionItem};
pub use loader::{load_dir, LoadError, LoadedDataset};
pub use store::{ContentStore, DetailView, StoreBuilder, StoreError};
