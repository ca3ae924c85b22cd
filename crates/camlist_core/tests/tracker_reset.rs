use std::sync::Once;

use camlist_core::{CamId, CamListTracker, CamRecord};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(grid_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TestCam {
    id: CamId,
}

impl CamRecord for TestCam {
    fn cam_id(&self) -> CamId {
        self.id
    }
}

fn cams(ids: &[CamId]) -> Vec<TestCam> {
    ids.iter().map(|&id| TestCam { id }).collect()
}

#[test]
fn reset_replaces_all_prior_state() {
    init_logging();
    let mut tracker = CamListTracker::new();
    tracker.merge(cams(&[1, 2, 3]), 3);
    tracker.merge(cams(&[4, 5, 6]), 3);
    assert_eq!(tracker.next_page(), 3);

    tracker.reset(cams(&[10, 11]), 3);

    assert_eq!(tracker.loaded_count(), 2);
    assert!(tracker.contains(10));
    assert!(tracker.contains(11));
    for old in [1, 2, 3, 4, 5, 6] {
        assert!(!tracker.contains(old));
    }
    assert_eq!(tracker.next_page(), 2);
}

#[test]
fn reset_dedupes_the_seed_batch() {
    init_logging();
    let mut tracker = CamListTracker::new();
    tracker.reset(cams(&[1, 1, 2, 2, 3]), 5);

    assert_eq!(tracker.loaded_count(), 3);
    // has_more is judged on the raw seed length, duplicates included.
    assert!(tracker.has_more());
}

#[test]
fn reset_with_short_seed_reports_no_more() {
    init_logging();
    let mut tracker = CamListTracker::new();
    tracker.reset(cams(&[1, 2]), 36);

    assert_eq!(tracker.next_page(), 2);
    assert!(!tracker.has_more());
}

#[test]
fn reset_with_empty_seed() {
    init_logging();
    let mut tracker: CamListTracker<TestCam> = CamListTracker::new();
    tracker.reset(Vec::new(), 36);

    assert_eq!(tracker.loaded_count(), 0);
    assert_eq!(tracker.next_page(), 2);
    assert!(!tracker.has_more());
}

#[test]
fn clear_returns_to_blank_slate() {
    init_logging();
    let mut tracker = CamListTracker::new();
    tracker.reset(cams(&[1, 2, 3]), 3);
    tracker.merge(cams(&[4, 5, 6]), 3);

    tracker.clear();

    assert_eq!(tracker.loaded_count(), 0);
    assert_eq!(tracker.next_page(), 1);
    assert!(tracker.has_more());
    assert!(!tracker.contains(1));
    assert!(tracker.records().is_empty());
}

#[test]
fn repeated_resets_do_not_leak() {
    init_logging();
    let mut tracker = CamListTracker::new();
    for round in 0..100u64 {
        let ids: Vec<CamId> = (round * 10..round * 10 + 3).collect();
        tracker.reset(cams(&ids), 3);
        assert_eq!(tracker.loaded_count(), 3);
        assert_eq!(tracker.next_page(), 2);
    }
}
