use strata_frames_core::{DrawingFrame, FrameError, FrameTable};

/// Keys 0, 5, 12 show drawings 0, 1, 2; 10 and 16 are null frames.
fn example_table() -> FrameTable {
    FrameTable::from_frames([
        (0, DrawingFrame::new(0)),
        (5, DrawingFrame::new(1)),
        (10, DrawingFrame::null()),
        (12, DrawingFrame::new(2)),
        (16, DrawingFrame::null()),
    ])
}

#[test]
fn drawing_index_at() {
    let table = example_table();
    assert_eq!(table.drawing_index_at(-100), None);
    assert_eq!(table.drawing_index_at(100), None);
    assert_eq!(table.drawing_index_at(0), Some(0));
    assert_eq!(table.drawing_index_at(1), Some(0));
    assert_eq!(table.drawing_index_at(5), Some(1));
    assert_eq!(table.drawing_index_at(10), None);
    assert_eq!(table.drawing_index_at(11), None);
    assert_eq!(table.drawing_index_at(15), Some(2));
}

#[test]
fn frame_key_at() {
    let table = example_table();
    assert_eq!(table.frame_key_at(-1), None);
    assert_eq!(table.frame_key_at(4), Some(0));
    assert_eq!(table.frame_key_at(9), Some(5));
    assert_eq!(table.frame_key_at(10), None);
    assert_eq!(table.frame_key_at(13), Some(12));
}

#[test]
fn duration_at() {
    let table = example_table();
    assert_eq!(table.duration_at(0), Some(5));
    assert_eq!(table.duration_at(12), Some(4));
    assert_eq!(table.duration_at(10), None);
    assert_eq!(table.duration_at(3), None);
}

#[test]
fn insert_frame_on_drawing_fails() {
    let mut table = example_table();
    assert_eq!(
        table.insert_frame(0, DrawingFrame::new(3)),
        Err(FrameError::Occupied { frame: 0 })
    );
    assert_eq!(table, example_table());
}

#[test]
fn insert_frame_replaces_null_frame() {
    let mut table = example_table();
    assert!(table.insert_frame(10, DrawingFrame::new(3)).is_ok());
    assert_eq!(table.drawing_index_at(10), Some(3));
    assert_eq!(table.drawing_index_at(11), Some(3));
    assert_eq!(table.drawing_index_at(12), Some(2));
    assert_eq!(table.len(), 5);
}

#[test]
fn insert_frame_with_duration_on_drawing_fails() {
    let mut table = example_table();
    assert!(table
        .insert_frame_with_duration(0, 10, DrawingFrame::new(3))
        .is_err());
    assert_eq!(table, example_table());
}

#[test]
fn insert_frame_with_duration_stops_at_next_key() {
    let mut table = example_table();
    assert!(table
        .insert_frame_with_duration(10, 2, DrawingFrame::new(3))
        .is_ok());
    assert_eq!(table.drawing_index_at(10), Some(3));
    assert_eq!(table.drawing_index_at(11), Some(3));
    assert_eq!(table.drawing_index_at(12), Some(2));
    assert_eq!(table.len(), 5);
}

#[test]
fn insert_frame_with_duration_adds_end_frame() {
    let mut table = example_table();
    assert!(table
        .insert_frame_with_duration(17, 10, DrawingFrame::new(3))
        .is_ok());
    let keys = table.sorted_keys();
    assert_eq!(keys.len(), 7);
    assert_eq!(keys[6] - keys[5], 10);
    assert!(table.frame(27).is_some_and(DrawingFrame::is_null));
    assert_eq!(table.drawing_index_at(26), Some(3));
    assert_eq!(table.drawing_index_at(27), None);
}

#[test]
fn insert_frame_with_duration_overrides_null_frames() {
    let mut table = FrameTable::from_frames([
        (0, DrawingFrame::new(1)),
        (1, DrawingFrame::null()),
        (2, DrawingFrame::null()),
        (3, DrawingFrame::null()),
    ]);
    assert!(table
        .insert_frame_with_duration(1, 10, DrawingFrame::new(3))
        .is_ok());
    assert_eq!(table.drawing_index_at(0), Some(1));
    assert_eq!(table.drawing_index_at(1), Some(3));
    assert_eq!(table.drawing_index_at(11), None);
    assert_eq!(table.sorted_keys(), vec![0, 1, 11]);
}

#[test]
fn insert_frame_with_zero_duration_holds() {
    let mut table = FrameTable::new();
    assert!(table
        .insert_frame_with_duration(4, 0, DrawingFrame::new(0))
        .is_ok());
    assert_eq!(table.sorted_keys(), vec![4]);
    assert_eq!(table.drawing_index_at(1000), Some(0));
}

#[test]
fn overwrite_frame() {
    let mut table = example_table();
    table.overwrite_frame(0, DrawingFrame::new(42));
    assert_eq!(table.drawing_index_at(0), Some(42));
    assert_eq!(table.len(), 5);
}

#[test]
fn remove_frame() {
    let mut table = example_table();
    assert!(table.remove_frame(5));
    assert!(!table.remove_frame(5));
    assert_eq!(table.drawing_index_at(5), Some(0));
}

#[test]
fn remove_drawing() {
    let mut first = FrameTable::from_frames([
        (0, DrawingFrame::new(0)),
        (10, DrawingFrame::new(1)),
        (20, DrawingFrame::new(2)),
    ]);
    let mut second = FrameTable::from_frames([(0, DrawingFrame::new(1))]);

    for table in [&mut first, &mut second] {
        table.remove_drawing(1);
    }

    assert_eq!(first.len(), 2);
    assert_eq!(first.frame(0).and_then(|f| f.drawing), Some(0));
    assert_eq!(first.frame(20).and_then(|f| f.drawing), Some(1));
    assert!(second.is_empty());
}

#[test]
fn table_loads_from_json() {
    let json = r#"{
        "0":  { "drawing": 0 },
        "5":  { "drawing": 1, "keyframe_type": "Breakdown" },
        "10": { "drawing": null }
    }"#;
    let table: FrameTable = serde_json::from_str(json).expect("parse frame table");
    assert_eq!(table.sorted_keys(), vec![0, 5, 10]);
    assert_eq!(table.drawing_index_at(7), Some(1));
    assert_eq!(table.drawing_index_at(10), None);
}
