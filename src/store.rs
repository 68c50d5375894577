//! File-backed note persistence: scan, load, save, create, delete.

use crate::domain::Note;
use crate::infra::{frontmatter, slugify, timestamp};
use chrono::Utc;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Errors during file system operations on notes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("not valid UTF-8: {path}")]
    InvalidUtf8 { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Creates an appropriate StoreError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied { path: path.into() },
            io::ErrorKind::InvalidData => StoreError::InvalidUtf8 { path: path.into() },
            _ => StoreError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Result of scanning the notes directory.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The notes directory does not exist. Distinguishable from an empty
    /// directory so hosts can offer to create it.
    MissingDir,
    /// The directory exists and was scanned.
    Scanned(ScanReport),
}

/// What a scan loaded and what it had to skip.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Notes that loaded successfully, in file-name order.
    pub notes: Vec<Note>,
    /// Note files that failed to load. The scan never aborts on these.
    pub skipped: Vec<ScanSkip>,
}

/// A note file the scan could not load.
#[derive(Debug)]
pub struct ScanSkip {
    pub path: PathBuf,
    pub error: StoreError,
}

/// Result of deleting a note file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The file was already gone; nothing to do.
    NotFound,
}

/// File-backed persistence for a single flat notes directory.
///
/// The directory is supplied at construction; the store keeps no other
/// state. All operations are synchronous, blocking calls on the caller's
/// thread, and the store assumes exclusive single-process access to the
/// directory (last writer wins, no conflict detection).
///
/// Mutations (`create`, `save`, `delete`) do NOT update any
/// [`SearchIndex`]: callers must rebuild the index from a fresh note list
/// before querying again.
///
/// [`SearchIndex`]: crate::index::SearchIndex
#[derive(Debug, Clone)]
pub struct NoteStore {
    notes_dir: PathBuf,
}

impl NoteStore {
    /// Creates a store over the given notes directory.
    ///
    /// The directory is not created or checked here; `scan` reports a
    /// missing directory and `save`/`create` create it on demand.
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
        }
    }

    /// Returns the directory this store operates on.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Enumerates `.md` files in the notes directory (non-recursive) and
    /// loads each one.
    ///
    /// Files that fail to load are logged and collected into the report
    /// without aborting the scan: one corrupted note must not block the
    /// rest. Non-markdown files, subdirectories, and hidden files are
    /// ignored entirely.
    ///
    /// # Errors
    ///
    /// Returns an error only when the directory itself cannot be
    /// enumerated. A missing directory is the non-error
    /// [`ScanOutcome::MissingDir`].
    pub fn scan(&self) -> Result<ScanOutcome, StoreError> {
        if !self.notes_dir.is_dir() {
            warn!(dir = %self.notes_dir.display(), "notes directory missing, nothing to scan");
            return Ok(ScanOutcome::MissingDir);
        }

        let mut report = ScanReport::default();
        let walker = WalkDir::new(&self.notes_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    let path = error
                        .path()
                        .unwrap_or(self.notes_dir.as_path())
                        .to_path_buf();
                    let error = StoreError::Io {
                        path: path.clone(),
                        source: error.into(),
                    };
                    warn!(path = %path.display(), %error, "skipping unreadable entry");
                    report.skipped.push(ScanSkip { path, error });
                    continue;
                }
            };
            if !entry.file_type().is_file() || is_hidden(&entry) || !has_md_extension(&entry) {
                continue;
            }
            match self.load(entry.path()) {
                Ok(note) => report.notes.push(note),
                Err(error) => {
                    warn!(path = %entry.path().display(), %error, "skipping note that failed to load");
                    report.skipped.push(ScanSkip {
                        path: entry.path().to_path_buf(),
                        error,
                    });
                }
            }
        }

        debug!(
            loaded = report.notes.len(),
            skipped = report.skipped.len(),
            "scan complete"
        );
        Ok(ScanOutcome::Scanned(report))
    }

    /// Loads a single note, decoding its front-matter.
    ///
    /// Missing or malformed metadata never fails the load; fields default
    /// instead: `title` to the file stem, `tags` to empty, `created` to the
    /// current time, `updated` to `created`.
    ///
    /// # Errors
    ///
    /// Returns a path-carrying [`StoreError`] when the file cannot be read
    /// or is not valid UTF-8.
    pub fn load(&self, path: &Path) -> Result<Note, StoreError> {
        let raw = fs::read_to_string(path).map_err(|e| StoreError::from_io(path, e))?;
        let (metadata, body) = frontmatter::parse(&raw);

        let title = str_field(&metadata, "title").unwrap_or_else(|| file_stem(path));
        let tags = tag_field(&metadata);
        let created = str_field(&metadata, "created").unwrap_or_else(timestamp::now);
        let updated = str_field(&metadata, "updated").unwrap_or_else(|| created.clone());

        Ok(Note {
            path: path.to_path_buf(),
            title,
            tags,
            created,
            updated,
            content: body.to_string(),
        })
    }

    /// Persists a note to its path, front-matter first, body trimmed.
    ///
    /// Metadata is written in fixed order (`title`, `tags`, `created`,
    /// `updated`) so saved files diff stably. Parent directories are
    /// created if missing, and the write goes through a temp file + rename
    /// so a crash mid-write leaves the previous file intact.
    ///
    /// `note.updated` is written as-is: bumping it before a content save is
    /// the caller's responsibility, as is rebuilding the search index
    /// afterward.
    pub fn save(&self, note: &Note) -> Result<(), StoreError> {
        let mut metadata = Mapping::new();
        metadata.insert("title".into(), note.title.clone().into());
        metadata.insert(
            "tags".into(),
            Value::Sequence(note.tags.iter().cloned().map(Value::String).collect()),
        );
        metadata.insert("created".into(), note.created.clone().into());
        metadata.insert("updated".into(), note.updated.clone().into());

        let full = format!(
            "{}\n{}",
            frontmatter::generate(&metadata),
            note.content.trim()
        );

        let parent = match note.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| StoreError::from_io(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::Io {
            path: note.path.clone(),
            source: e,
        })?;
        temp.write_all(full.as_bytes()).map_err(|e| StoreError::Io {
            path: note.path.clone(),
            source: e,
        })?;
        temp.persist(&note.path).map_err(|e| StoreError::AtomicWrite {
            path: note.path.clone(),
            source: e.error,
        })?;

        Ok(())
    }

    /// Creates a new note file in the notes directory and persists it.
    ///
    /// The file name is a slug of the title (lowercase, spaces to
    /// underscores, everything outside `[a-z0-9_]` stripped); a title with
    /// no safe characters falls back to a timestamped `untitled_*` name.
    /// If the slugged path already exists, `_1`, `_2`, … are appended until
    /// a free path is found. The collision check runs at creation time
    /// only; concurrent external writers are out of scope.
    ///
    /// `created` and `updated` are both set to the current time.
    pub fn create(
        &self,
        title: &str,
        tags: Vec<String>,
        content: &str,
    ) -> Result<Note, StoreError> {
        let slug = slugify(title);
        let stem = if slug.is_empty() {
            format!("untitled_{}", Utc::now().format("%Y%m%d%H%M%S"))
        } else {
            slug
        };

        let mut path = self.notes_dir.join(format!("{stem}.md"));
        let mut counter = 1;
        while path.exists() {
            path = self.notes_dir.join(format!("{stem}_{counter}.md"));
            counter += 1;
        }

        let now = timestamp::now();
        let note = Note {
            path,
            title: title.to_string(),
            tags,
            created: now.clone(),
            updated: now,
            content: content.to_string(),
        };
        self.save(&note)?;
        debug!(path = %note.path.display(), "created note");
        Ok(note)
    }

    /// Removes a note file.
    ///
    /// A path that does not exist is the non-error
    /// [`DeleteOutcome::NotFound`], so callers can tell "nothing to do"
    /// from a real I/O failure. Remember to drop the note from any
    /// in-memory list and rebuild the search index.
    pub fn delete(&self, path: &Path) -> Result<DeleteOutcome, StoreError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
            Err(error) => Err(StoreError::from_io(path, error)),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn has_md_extension(entry: &DirEntry) -> bool {
    entry.path().extension().is_some_and(|ext| ext == "md")
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn str_field(metadata: &Mapping, key: &str) -> Option<String> {
    metadata.get(key).and_then(Value::as_str).map(str::to_string)
}

fn tag_field(metadata: &Mapping) -> Vec<String> {
    match metadata.get("tags") {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
