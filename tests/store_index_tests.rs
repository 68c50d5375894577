//! End-to-end tests driving the note store and search index together,
//! the way a host application would.

use markbook::index::{SearchIndex, SearchScope};
use markbook::store::{DeleteOutcome, NoteStore, ScanOutcome, ScanReport};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn scan_report(store: &NoteStore) -> ScanReport {
    match store.scan().unwrap() {
        ScanOutcome::Scanned(report) => report,
        ScanOutcome::MissingDir => panic!("notes directory should exist"),
    }
}

fn titles(notes: &[&markbook::domain::Note]) -> Vec<String> {
    notes.iter().map(|note| note.title.clone()).collect()
}

#[test]
fn create_scan_build_search_session() {
    let dir = TempDir::new().unwrap();
    let store = NoteStore::new(dir.path());

    store
        .create(
            "Python Web Development",
            vec!["python".into(), "web".into()],
            "Django and Flask are popular Python frameworks.",
        )
        .unwrap();
    store
        .create(
            "Project Ideas: Python",
            vec!["python".into(), "ideas".into()],
            "Brainstorming new python project ideas.",
        )
        .unwrap();
    store
        .create(
            "Gardening Tips",
            vec!["Hobby".into()],
            "Water the roses regularly.",
        )
        .unwrap();

    let report = scan_report(&store);
    assert_eq!(report.notes.len(), 3);
    assert!(report.skipped.is_empty());

    let mut index = SearchIndex::new();
    index.build(&report.notes);

    // Multi-term queries require every term somewhere in the note.
    let both = index.search("python", SearchScope::default());
    assert_eq!(both.len(), 2);
    let only_ideas = index.search("python ideas", SearchScope::default());
    assert_eq!(titles(&only_ideas), vec!["Project Ideas: Python"]);
    assert!(
        index
            .search("nonexistent_term_xyz", SearchScope::default())
            .is_empty()
    );
    assert_eq!(index.search("", SearchScope::default()).len(), 3);

    // Tag filtering is case-insensitive; the tag listing is not.
    assert_eq!(
        titles(&index.filter_by_tag("hobby")),
        vec!["Gardening Tips"]
    );
    assert_eq!(index.all_tags(), vec!["Hobby", "ideas", "python", "web"]);
}

#[test]
fn edit_save_rescan_cycle_updates_query_results() {
    let dir = TempDir::new().unwrap();
    let store = NoteStore::new(dir.path());

    let created = store
        .create("Draft", vec!["draft".into()], "original wording")
        .unwrap();

    let mut index = SearchIndex::new();
    index.build(&scan_report(&store).notes);
    assert_eq!(index.search("wording", SearchScope::default()).len(), 1);

    // Host edits the note: mutate in place, bump `updated`, save.
    let mut note = created.clone();
    note.content = "rewritten text".to_string();
    note.tags.push("edited".to_string());
    note.updated = "2030-01-01T00:00:00+00:00".to_string();
    store.save(&note).unwrap();

    // The old snapshot still answers from stale data until rebuilt.
    assert_eq!(index.search("wording", SearchScope::default()).len(), 1);

    let report = scan_report(&store);
    index.build(&report.notes);
    assert!(index.search("wording", SearchScope::default()).is_empty());
    assert_eq!(index.search("rewritten", SearchScope::default()).len(), 1);
    assert_eq!(index.all_tags(), vec!["draft", "edited"]);

    let reloaded = &report.notes[0];
    assert_eq!(reloaded.created, created.created);
    assert_eq!(reloaded.updated, "2030-01-01T00:00:00+00:00");
}

#[test]
fn delete_then_rebuild_removes_the_note_from_results() {
    let dir = TempDir::new().unwrap();
    let store = NoteStore::new(dir.path());

    let keep = store.create("Keeper", vec![], "stays").unwrap();
    let doomed = store.create("Doomed", vec![], "goes").unwrap();

    assert_eq!(store.delete(&doomed.path).unwrap(), DeleteOutcome::Deleted);
    // Deleting again reports not-found rather than an error.
    assert_eq!(store.delete(&doomed.path).unwrap(), DeleteOutcome::NotFound);

    let report = scan_report(&store);
    let mut index = SearchIndex::new();
    index.build(&report.notes);

    assert_eq!(titles(&index.search("", SearchScope::default())), vec!["Keeper"]);
    assert_eq!(report.notes[0].path, keep.path);
}

#[test]
fn same_title_notes_coexist_and_both_surface_in_search() {
    let dir = TempDir::new().unwrap();
    let store = NoteStore::new(dir.path());

    let first = store
        .create("Meeting Notes", vec![], "about the roadmap")
        .unwrap();
    let second = store
        .create("Meeting Notes", vec![], "about the budget")
        .unwrap();
    assert_ne!(first.path, second.path);

    let mut index = SearchIndex::new();
    index.build(&scan_report(&store).notes);

    assert_eq!(index.search("meeting", SearchScope::default()).len(), 2);
    assert_eq!(index.search("budget", SearchScope::default()).len(), 1);
}

#[test]
fn scan_survives_foreign_and_corrupt_files() {
    let dir = TempDir::new().unwrap();
    let store = NoteStore::new(dir.path());

    store.create("Real Note", vec![], "fine").unwrap();
    fs::write(dir.path().join("junk.bin"), [0u8, 159, 146, 150]).unwrap();
    fs::write(dir.path().join("corrupt.md"), [0xFFu8, 0xFE, 0x00]).unwrap();

    let report = scan_report(&store);
    assert_eq!(report.notes.len(), 1);
    assert_eq!(report.notes[0].title, "Real Note");
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("corrupt.md"));
}

#[test]
fn notes_written_by_other_tools_round_trip_through_a_save() {
    let dir = TempDir::new().unwrap();
    let store = NoteStore::new(dir.path());

    // Hand-written file: no front-matter at all.
    let path = dir.path().join("plain.md");
    fs::write(&path, "just some text\n").unwrap();

    let mut note = store.load(&path).unwrap();
    assert_eq!(note.title, "plain");

    // First save normalizes it into the front-matter format.
    note.tags.push("imported".to_string());
    store.save(&note).unwrap();

    let reloaded = store.load(&path).unwrap();
    assert_eq!(reloaded.title, "plain");
    assert_eq!(reloaded.tags, vec!["imported"]);
    assert_eq!(reloaded.created, note.created);
    assert_eq!(reloaded.content.trim(), "just some text");

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("---\n"));
}
