//! Note struct representing a markdown note with front-matter metadata.

use std::fmt;
use std::path::PathBuf;

/// A markdown note backed by a file on disk.
///
/// The `path` is the note's identity: unique within a notes directory and
/// immutable for the note's lifetime (renames are delete + recreate).
/// Everything else is plain mutable data: callers edit `title`, `tags`,
/// `content`, bump `updated`, and persist through [`NoteStore::save`].
///
/// # Fields
/// - `title`: defaults to the file stem when the front-matter lacks one
/// - `tags`: original casing and insertion order preserved; duplicates are
///   not removed at storage time
/// - `created` / `updated`: ISO-8601 UTC timestamp strings; `created` is set
///   once, `updated` starts equal to `created` and is refreshed by the
///   caller on every content save
/// - `content`: markdown body without the front-matter block
///
/// [`NoteStore::save`]: crate::store::NoteStore::save
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub path: PathBuf,
    pub title: String,
    pub tags: Vec<String>,
    pub created: String,
    pub updated: String,
    pub content: String,
}

impl Note {
    /// Creates a note with empty tags and content.
    ///
    /// `updated` starts equal to `created`.
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>, created: String) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            tags: Vec::new(),
            created: created.clone(),
            updated: created,
            content: String::new(),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.path.display())
    }
}
