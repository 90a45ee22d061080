//! Playlist store integration tests: mutation notifications, CSV import
//! atomicity and JSON persistence.

use utawaku_core::{
    CoreError, CsvError, PlaylistChange, PlaylistStore, Segment, SegmentSource, VideoId,
};

fn segment(id: &str, title: &str) -> Segment {
    Segment::new(VideoId::parse(id).unwrap(), title, 10, 20)
}

fn three() -> PlaylistStore {
    PlaylistStore::with_segments(vec![
        segment("aaaaaaaaaaa", "A"),
        segment("bbbbbbbbbbb", "B"),
        segment("ccccccccccc", "C"),
    ])
}

fn titles(store: &PlaylistStore) -> Vec<&str> {
    store.iter().map(|s| s.title.as_str()).collect()
}

#[test]
fn push_and_insert_report_index() {
    let mut store = three();
    assert_eq!(store.push(segment("ddddddddddd", "D")), PlaylistChange::Inserted(3));
    assert_eq!(
        store.insert(1, segment("eeeeeeeeeee", "E")).unwrap(),
        PlaylistChange::Inserted(1)
    );
    assert_eq!(titles(&store), ["A", "E", "B", "C", "D"]);
    assert!(matches!(
        store.insert(9, segment("fffffffffff", "F")),
        Err(CoreError::IndexOutOfBounds { index: 9, len: 5 })
    ));
}

#[test]
fn remove_returns_segment_and_change() {
    let mut store = three();
    let (removed, change) = store.remove(1).unwrap();
    assert_eq!(removed.title, "B");
    assert_eq!(change, PlaylistChange::Removed(1));
    assert_eq!(titles(&store), ["A", "C"]);
    assert!(store.remove(2).is_err());
}

#[test]
fn move_segment_reorders() {
    let mut store = three();
    assert_eq!(
        store.move_segment(0, 2).unwrap(),
        PlaylistChange::Moved { from: 0, to: 2 }
    );
    assert_eq!(titles(&store), ["B", "C", "A"]);

    store.move_segment(2, 0).unwrap();
    assert_eq!(titles(&store), ["A", "B", "C"]);
    assert!(store.move_segment(0, 3).is_err());
}

#[test]
fn commit_edit_replaces_or_appends_by_title() {
    let mut store = three();

    let mut edited = store.get(1).unwrap().clone();
    edited.end_sec = 99;
    assert_eq!(
        store.commit_edit(1, "B", edited).unwrap(),
        PlaylistChange::Updated(1)
    );
    assert_eq!(store.get(1).unwrap().end_sec, 99);

    let mut renamed = store.get(1).unwrap().clone();
    renamed.title = "B (live)".to_string();
    assert_eq!(
        store.commit_edit(1, "B", renamed).unwrap(),
        PlaylistChange::Inserted(3)
    );
    assert_eq!(titles(&store), ["A", "B", "C", "B (live)"]);
}

#[test]
fn failed_import_leaves_store_untouched() {
    let mut store = three();
    let before = store.clone();

    let err = store
        .import_csv("videoId,title\naaaaaaaaaaa,ok\nnot-an-id,bad")
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Csv(CsvError::InvalidField { line: 3, .. })
    ));
    assert_eq!(store, before);
}

#[test]
fn import_replaces_everything() {
    let mut store = three();
    let change = store
        .import_csv("videoId,title,start,end,rating,article\nzzzzzzzzzzz,Z,5,15,3,note")
        .unwrap();
    assert_eq!(change, PlaylistChange::Replaced);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0).unwrap().article, "note");
}

#[test]
fn export_then_import_preserves_playlist() {
    let store = PlaylistStore::with_defaults();
    let mut copy = PlaylistStore::new();
    copy.import_csv(&store.export_csv()).unwrap();
    assert_eq!(copy, store);
}

#[test]
fn segment_source_view_matches_store() {
    let store = three();
    let source: &dyn SegmentSource = &store;
    assert_eq!(source.len(), 3);
    assert_eq!(source.segment(2).unwrap().title, "C");
    assert!(source.segment(3).is_none());
    assert!(!source.is_empty());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("playlist.json");

    let store = three();
    store.save(&path).unwrap();
    let loaded = PlaylistStore::load(&path).unwrap();
    assert_eq!(loaded, store);
}

#[test]
fn load_missing_or_empty_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlist.json");

    let loaded = PlaylistStore::load(&path).unwrap();
    assert_eq!(loaded, PlaylistStore::with_defaults());
    assert_eq!(loaded.len(), 4);

    PlaylistStore::new().save(&path).unwrap();
    assert_eq!(PlaylistStore::load(&path).unwrap().len(), 4);
}

#[test]
fn load_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlist.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        PlaylistStore::load(&path),
        Err(CoreError::Serialization(_))
    ));
}

#[test]
fn reset_restores_defaults() {
    let mut store = three();
    assert_eq!(store.reset_to_default(), PlaylistChange::Replaced);
    assert_eq!(store.get(0).unwrap().title, "Never Gonna Give You Up");
}
