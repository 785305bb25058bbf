//! Keyed, read-only store of knowledge topics.
//!
//! The store is built once from already-parsed records (see [`crate::loader`]
//! for reading data files) and answers point lookups by id. Nothing is mutated
//! after [`StoreBuilder::build`].
//!
//! ```
//! use kbase::domain::ContentRecord;
//! use kbase::store::ContentStore;
//!
//! let store = ContentStore::from_records(vec![
//!     ContentRecord::new("a", "A", "first topic"),
//!     ContentRecord::new("b", "B", "second topic"),
//! ])
//! .unwrap();
//!
//! assert_eq!(store.get("a").map(|r| r.title.as_str()), Some("A"));
//! assert!(store.get("z").is_none());
//! ```

pub mod builder;
pub mod content_store;

pub use builder::{StoreBuilder, StoreError};
pub use content_store::{ContentStore, DetailView, INLINE_ORIGIN};
