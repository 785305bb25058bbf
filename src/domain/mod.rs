//! Domain types for the knowledge base.
//!
//! This module contains the core data structures:
//! - ContentRecord: A topic's full payload (overview, examples, notes)
//! - Example: A code sample owned by a record
//! - Section: Navigation outline grouping topics by theme

pub mod outline;
pub mod record;

// Re-export commonly used types
pub use outline::{Section, SectionItem};
pub use record::{ContentRecord, Example};
