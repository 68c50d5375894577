//! In-memory, rebuildable search index over a note collection.

use crate::domain::Note;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Which note fields a keyword search looks at.
///
/// Defaults to all three, matching the common "search everywhere" case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchScope {
    pub title: bool,
    pub tags: bool,
    pub content: bool,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            title: true,
            tags: true,
            content: true,
        }
    }
}

/// A case-normalized projection of one note, plus the note itself for
/// result materialization.
#[derive(Debug)]
struct IndexEntry {
    title: String,
    tags: Vec<String>,
    content: String,
    note: Note,
}

/// A queryable snapshot of a note collection.
///
/// The index is never kept in sync with the [`NoteStore`] automatically:
/// after any create, save, or delete, callers rebuild it from a fresh note
/// list with [`SearchIndex::build`]. Queries borrow from the snapshot, so a
/// build generation must be held immutable while results are in use; the
/// index is not safe for concurrent build/search without external
/// serialization.
///
/// [`NoteStore`]: crate::store::NoteStore
#[derive(Debug, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed notes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the entire snapshot with a projection of `notes`.
    ///
    /// Per note this precomputes the lower-cased title, tags, and content;
    /// the note order here is the order queries return results in. Cost is
    /// linear in the total text size.
    pub fn build(&mut self, notes: &[Note]) {
        self.entries = notes
            .iter()
            .map(|note| IndexEntry {
                title: note.title.to_lowercase(),
                tags: note.tags.iter().map(|tag| tag.to_lowercase()).collect(),
                content: note.content.to_lowercase(),
                note: note.clone(),
            })
            .collect();
        debug!(notes = self.entries.len(), "search index rebuilt");
    }

    /// Keyword search with AND semantics.
    ///
    /// The query is lower-cased and split on whitespace; a note matches
    /// when every term occurs as a substring of the enabled fields joined
    /// with single spaces (title, each tag, then content). A blank query
    /// returns every indexed note. Results keep index order with no
    /// relevance ranking, and each note appears at most once even if the same path
    /// was indexed twice.
    pub fn search(&self, query: &str, scope: SearchScope) -> Vec<&Note> {
        if query.trim().is_empty() {
            return self.entries.iter().map(|entry| &entry.note).collect();
        }

        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for entry in &self.entries {
            let mut fields: Vec<&str> = Vec::new();
            if scope.title {
                fields.push(&entry.title);
            }
            if scope.tags {
                fields.extend(entry.tags.iter().map(String::as_str));
            }
            if scope.content {
                fields.push(&entry.content);
            }
            let haystack = fields.join(" ");

            if terms.iter().all(|term| haystack.contains(term))
                && seen.insert(entry.note.path.as_path())
            {
                results.push(&entry.note);
            }
        }
        results
    }

    /// Case-insensitive exact-match filter on the tag set.
    ///
    /// A blank tag returns every indexed note, in index order.
    pub fn filter_by_tag(&self, tag: &str) -> Vec<&Note> {
        if tag.trim().is_empty() {
            return self.entries.iter().map(|entry| &entry.note).collect();
        }

        let needle = tag.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.tags.iter().any(|tag| *tag == needle))
            .map(|entry| &entry.note)
            .collect()
    }

    /// The union of all notes' tags in their original casing, sorted by
    /// code point.
    ///
    /// Casing variants are distinct entries: `Hobby` and `hobby` both
    /// appear when both occur in the source notes.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags = BTreeSet::new();
        for entry in &self.entries {
            for tag in &entry.note.tags {
                tags.insert(tag.clone());
            }
        }
        tags.into_iter().collect()
    }
}
