//! The read-only content store.

use std::collections::{HashMap, HashSet};

use crate::domain::{ContentRecord, Section, SectionItem};

use super::builder::{StoreBuilder, StoreError};

/// Origin name used by [`ContentStore::from_records`]
pub const INLINE_ORIGIN: &str = "inline";

#[derive(Debug, Clone)]
pub(crate) struct RecordEntry {
    pub(crate) record: ContentRecord,
    pub(crate) origin: String,
}

#[derive(Debug, Clone)]
pub(crate) struct SectionEntry {
    pub(crate) section: Section,
    pub(crate) origin: String,
}

/// Immutable keyed store of content records
///
/// Built once through [`StoreBuilder`], then only read. Holds no interior
/// mutability, so a shared reference can be handed to any number of threads.
#[derive(Debug, Clone)]
pub struct ContentStore {
    records: Vec<RecordEntry>,
    index: HashMap<String, usize>,
    sections: Vec<SectionEntry>,
    items: HashMap<String, (usize, usize)>,
    origins: Vec<String>,
}

/// What can be shown for an id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView<'a> {
    /// A full record exists
    Full(&'a ContentRecord),

    /// Only the outline entry exists; its detail has not been written yet
    Summary(&'a SectionItem),
}

impl DetailView<'_> {
    /// Display title for either variant
    pub fn title(&self) -> &str {
        match self {
            DetailView::Full(record) => &record.title,
            DetailView::Summary(item) => &item.name,
        }
    }
}

impl ContentStore {
    /// Start building a store
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Build a store from a single inline list of records
    pub fn from_records(
        records: impl IntoIterator<Item = ContentRecord>,
    ) -> Result<Self, StoreError> {
        Ok(StoreBuilder::new()
            .with_records(INLINE_ORIGIN, records)?
            .build())
    }

    pub(crate) fn from_parts(
        records: Vec<RecordEntry>,
        index: HashMap<String, usize>,
        sections: Vec<SectionEntry>,
        items: HashMap<String, (usize, usize)>,
        origins: Vec<String>,
    ) -> Self {
        Self {
            records,
            index,
            sections,
            items,
            origins,
        }
    }

    /// Get a record by id
    ///
    /// A missing id is a normal outcome and yields `None`.
    pub fn get(&self, id: &str) -> Option<&ContentRecord> {
        self.index.get(id).map(|&pos| &self.records[pos].record)
    }

    /// Check whether a record exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Name of the source a record was loaded from
    pub fn origin_of(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .map(|&pos| self.records[pos].origin.as_str())
    }

    /// All records in authoring order
    pub fn records(&self) -> impl Iterator<Item = &ContentRecord> + '_ {
        self.records.iter().map(|entry| &entry.record)
    }

    /// Records from one origin, in authoring order
    pub fn records_from<'a>(
        &'a self,
        origin: &'a str,
    ) -> impl Iterator<Item = &'a ContentRecord> + 'a {
        self.records
            .iter()
            .filter(move |entry| entry.origin == origin)
            .map(|entry| &entry.record)
    }

    /// Origins in the order they were first added
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All outline sections in load order
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.iter().map(|entry| &entry.section)
    }

    /// Outline sections from one origin
    pub fn sections_from<'a>(&'a self, origin: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections
            .iter()
            .filter(move |entry| entry.origin == origin)
            .map(|entry| &entry.section)
    }

    /// Get an outline item by id
    ///
    /// When several modules list the same topic, the first one loaded wins.
    pub fn item(&self, id: &str) -> Option<&SectionItem> {
        self.items
            .get(id)
            .map(|&(section, item)| &self.sections[section].section.items[item])
    }

    /// Resolve what to display for an id
    ///
    /// Prefers the full record, falls back to the outline entry.
    pub fn detail_view(&self, id: &str) -> Option<DetailView<'_>> {
        if let Some(record) = self.get(id) {
            return Some(DetailView::Full(record));
        }
        self.item(id).map(DetailView::Summary)
    }

    /// Outline items that have no record yet, in outline order
    ///
    /// Each id is reported once, at its first occurrence.
    pub fn missing_details(&self) -> Vec<&SectionItem> {
        let mut seen = HashSet::new();
        self.sections()
            .flat_map(|section| section.items.iter())
            .filter(|item| !self.contains(&item.id) && seen.insert(item.id.as_str()))
            .collect()
    }

    /// Records that no outline item links to, in authoring order
    pub fn unlisted_records(&self) -> Vec<&ContentRecord> {
        self.records()
            .filter(|record| !self.items.contains_key(&record.id))
            .collect()
    }
}
