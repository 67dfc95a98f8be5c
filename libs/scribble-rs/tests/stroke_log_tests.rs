use scribble_rs::{Color, StrokeLog};
use test_utils::{fill, line, three_strokes};

#[test]
fn record_undo_record() {
    let [s1, s2, s3] = three_strokes();
    let s4 = line((0, 0), (499, 499));
    let mut log = StrokeLog::new();

    log.record(s1.clone());
    log.record(s2.clone());
    log.record(s3.clone());
    assert_eq!(log.history(), &[s1.clone(), s2.clone(), s3.clone()]);
    assert!(log.redo_stack().is_empty());

    assert_eq!(log.undo(), Some(s3.clone()));
    assert_eq!(log.history(), &[s1.clone(), s2.clone()]);
    assert_eq!(log.redo_stack(), &[s3]);

    log.record(s4.clone());
    assert_eq!(log.history(), &[s1, s2, s4]);
    assert!(log.redo_stack().is_empty());
}

#[test]
fn undo_then_redo_restores_history() {
    let strokes = three_strokes();
    for n in 0..=strokes.len() {
        let mut log = StrokeLog::new();
        strokes.iter().cloned().for_each(|s| log.record(s));
        let before = log.history().to_vec();

        for _ in 0..n {
            assert!(log.undo().is_some());
        }
        assert_eq!(log.len(), strokes.len() - n);
        assert_eq!(log.redo_stack().len(), n);

        for _ in 0..n {
            assert!(log.redo().is_some());
        }
        assert_eq!(log.history(), before.as_slice());
        assert!(!log.has_redo());
    }
}

#[test]
fn redo_order_is_most_recent_first() {
    let [s1, s2, s3] = three_strokes();
    let mut log = StrokeLog::new();
    log.record(s1);
    log.record(s2.clone());
    log.record(s3.clone());

    log.undo();
    log.undo();
    assert_eq!(log.redo_stack(), &[s3.clone(), s2.clone()]);
    assert_eq!(log.redo(), Some(s2));
    assert_eq!(log.redo(), Some(s3));
}

#[test]
fn recording_truncates_redo() {
    let [s1, s2, s3] = three_strokes();
    let mut log = StrokeLog::new();
    log.record(s1);
    log.record(s2);
    log.undo();
    log.undo();
    assert!(log.has_redo());

    log.record(s3);
    assert!(!log.has_redo());
    assert_eq!(log.redo(), None);
    assert_eq!(log.redo(), None);

    log.undo();
    assert!(log.has_redo());
}

#[test]
fn empty_stacks_are_no_ops() {
    let mut log = StrokeLog::new();
    assert_eq!(log.undo(), None);
    assert_eq!(log.redo(), None);
    assert!(log.is_empty());
    assert!(!log.has_undo());
}

#[test]
fn every_stroke_lives_in_one_stack() {
    let strokes = three_strokes();
    let mut log = StrokeLog::new();
    strokes.iter().cloned().for_each(|s| log.record(s));
    log.undo();
    log.redo();
    log.undo();
    log.undo();

    assert_eq!(log.history().len() + log.redo_stack().len(), strokes.len());
    for stroke in &strokes {
        let in_history = log.history().contains(stroke);
        let in_redo = log.redo_stack().contains(stroke);
        assert!(in_history ^ in_redo);
    }
}

#[test]
fn clear_empties_both_stacks() {
    let mut log = StrokeLog::new();
    log.record(fill(Color::WHITE));
    log.record(line((1, 1), (5, 5)));
    log.undo();
    log.clear();

    assert!(log.history().is_empty());
    assert!(log.redo_stack().is_empty());
}

#[test]
fn log_survives_json() {
    let mut log = StrokeLog::new();
    three_strokes().into_iter().for_each(|s| log.record(s));
    log.undo();

    let json = serde_json::to_string(&log).unwrap();
    let back: StrokeLog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
}
