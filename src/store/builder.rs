//! One-shot construction of a [`ContentStore`].
//!
//! Records and sections are added per origin (the module or data file they
//! came from). Every id is checked as it arrives so a duplicate record is
//! reported with both places it was defined. Outline item ids only need to be
//! unique within one origin.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use super::content_store::{ContentStore, RecordEntry, SectionEntry};
use crate::domain::{ContentRecord, Section};

/// Errors raised while building a store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate record id '{id}' (defined in '{first}' and again in '{second}')")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Duplicate outline item id '{id}' in '{origin}'")]
    DuplicateItem { id: String, origin: String },

    #[error("Empty {kind} id in '{origin}'")]
    EmptyId { kind: &'static str, origin: String },
}

/// Accumulates records and outline sections, then freezes them into a store
#[derive(Debug, Default)]
pub struct StoreBuilder {
    records: Vec<RecordEntry>,
    index: HashMap<String, usize>,
    sections: Vec<SectionEntry>,
    items: HashMap<String, (usize, usize)>,
    origin_items: HashSet<(String, String)>,
    origins: Vec<String>,
}

impl StoreBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single record from `origin`
    pub fn add_record(&mut self, origin: &str, record: ContentRecord) -> Result<(), StoreError> {
        if record.id.trim().is_empty() {
            return Err(StoreError::EmptyId {
                kind: "record",
                origin: origin.to_string(),
            });
        }

        if let Some(&existing) = self.index.get(&record.id) {
            return Err(StoreError::DuplicateId {
                id: record.id,
                first: self.records[existing].origin.clone(),
                second: origin.to_string(),
            });
        }

        self.note_origin(origin);
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(RecordEntry {
            record,
            origin: origin.to_string(),
        });

        Ok(())
    }

    /// Add every record from `origin`, keeping their order
    pub fn with_records(
        mut self,
        origin: &str,
        records: impl IntoIterator<Item = ContentRecord>,
    ) -> Result<Self, StoreError> {
        for record in records {
            self.add_record(origin, record)?;
        }
        Ok(self)
    }

    /// Add an outline section from `origin`
    ///
    /// An item id may appear under several origins, since one topic can be
    /// listed by more than one module, but only once per origin. The section
    /// is rejected as a whole if any item id is empty or already used by
    /// this origin. Lookups by item id resolve to the first occurrence.
    pub fn add_section(&mut self, origin: &str, section: Section) -> Result<(), StoreError> {
        let mut seen = HashSet::new();

        for item in &section.items {
            if item.id.trim().is_empty() {
                return Err(StoreError::EmptyId {
                    kind: "outline item",
                    origin: origin.to_string(),
                });
            }

            let taken = self
                .origin_items
                .contains(&(origin.to_string(), item.id.clone()));
            if taken || !seen.insert(item.id.as_str()) {
                return Err(StoreError::DuplicateItem {
                    id: item.id.clone(),
                    origin: origin.to_string(),
                });
            }
        }

        let section_pos = self.sections.len();
        for (item_pos, item) in section.items.iter().enumerate() {
            self.items
                .entry(item.id.clone())
                .or_insert((section_pos, item_pos));
            self.origin_items
                .insert((origin.to_string(), item.id.clone()));
        }

        self.note_origin(origin);
        self.sections.push(SectionEntry {
            section,
            origin: origin.to_string(),
        });

        Ok(())
    }

    /// Add every section from `origin`, keeping their order
    pub fn with_sections(
        mut self,
        origin: &str,
        sections: impl IntoIterator<Item = Section>,
    ) -> Result<Self, StoreError> {
        for section in sections {
            self.add_section(origin, section)?;
        }
        Ok(self)
    }

    /// Number of records added so far
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Freeze into a read-only store
    pub fn build(self) -> ContentStore {
        debug!(
            records = self.records.len(),
            sections = self.sections.len(),
            origins = self.origins.len(),
            "Content store built"
        );

        ContentStore::from_parts(
            self.records,
            self.index,
            self.sections,
            self.items,
            self.origins,
        )
    }

    fn note_origin(&mut self, origin: &str) {
        if !self.origins.iter().any(|o| o == origin) {
            self.origins.push(origin.to_string());
        }
    }
}
