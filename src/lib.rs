//! markbook - markdown note persistence with an in-memory search index
//!
//! Notes are UTF-8 `.md` files with an optional YAML front-matter block
//! (`title`, `tags`, `created`, `updated`) living in a single flat folder.
//! [`store::NoteStore`] owns the on-disk lifecycle (scan, load, save,
//! create, delete) and [`index::SearchIndex`] answers keyword and tag
//! queries over a snapshot of loaded notes.
//!
//! The index is an explicit snapshot, not a cache: rebuild it after any
//! store mutation.
//!
//! ```no_run
//! use markbook::index::{SearchIndex, SearchScope};
//! use markbook::store::{NoteStore, ScanOutcome};
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = NoteStore::new("/home/me/notes");
//! store.create("Gardening Tips", vec!["hobby".into()], "Water the roses.")?;
//!
//! let mut index = SearchIndex::new();
//! if let ScanOutcome::Scanned(report) = store.scan()? {
//!     index.build(&report.notes);
//! }
//! for note in index.search("roses", SearchScope::default()) {
//!     println!("{note}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod index;
pub mod infra;
pub mod store;
