//! Lifecycle tests driving a checklist through click sequences and
//! re-opening it from storage, as a browser session would across reloads.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use checklist::checklist::{Checklist, open_from_root};
use checklist::core::graph::CourseGraph;
use checklist::core::types::{CourseState, ToggleOutcome};
use checklist::course::default_catalog;
use checklist::io::approval_store::MemoryStore;
use checklist::io::config::FeedbackConfig;
use checklist::io::init::{InitOptions, init_checklist};
use checklist::test_support::two_course_graph;

fn default_graph() -> Arc<CourseGraph> {
    Arc::new(CourseGraph::build(default_catalog().courses).expect("graph"))
}

/// Walks the two-course scenario: rejected click, approval chain, then
/// unapproving the prerequisite without cascading.
#[test]
fn two_course_scenario() {
    let mut checklist = Checklist::open(
        two_course_graph(),
        MemoryStore::new("approvedCourses"),
        FeedbackConfig::default(),
    );

    let rejected = checklist.click("B");
    let ToggleOutcome::Rejected(rejection) = &rejected.outcome else {
        panic!("expected rejection, got {:?}", rejected.outcome);
    };
    assert_eq!(rejection.missing_codes, vec!["A"]);
    assert!(rejected.feedback.expect("feedback").message.contains("Alpha"));
    assert_eq!(rejected.blocked.get("B"), Some(&true));
    assert!(!checklist.engine().is_approved("B"));

    assert_eq!(checklist.click("A").outcome, ToggleOutcome::Approved);
    assert_eq!(checklist.click("B").outcome, ToggleOutcome::Approved);

    let report = checklist.click("A");
    assert_eq!(report.outcome, ToggleOutcome::Unapproved);
    assert!(checklist.engine().is_approved("B"));
    assert_eq!(checklist.engine().state_of("B"), Some(CourseState::Approved));
    assert_eq!(checklist.engine().missing_prerequisites("B"), vec!["A"]);
    assert_eq!(report.blocked.get("A"), Some(&false));
}

/// Approvals written by one session hydrate the next one unchanged.
#[test]
fn approvals_survive_reopen_from_disk() {
    let temp = tempfile::tempdir().expect("tempdir");
    init_checklist(temp.path(), &InitOptions { force: false }).expect("init");

    let mut first = open_from_root(temp.path()).expect("open");
    for code in ["PRG1", "MAT1", "EDD", "MAT2"] {
        assert_eq!(first.click(code).outcome, ToggleOutcome::Approved, "{code}");
    }
    let expected: HashSet<String> = first.engine().approved_codes().into_iter().collect();

    let second = open_from_root(temp.path()).expect("reopen");
    let hydrated: HashSet<String> = second.engine().approved_codes().into_iter().collect();
    assert_eq!(hydrated, expected);
    assert!(!second.engine().is_blocked("ALG"));
    assert!(!second.engine().is_blocked("MAT3"));
}

/// A corrupt approval file degrades the session to memory-only instead of
/// failing every click.
#[test]
fn corrupt_approval_file_degrades_session() {
    let temp = tempfile::tempdir().expect("tempdir");
    let paths = init_checklist(temp.path(), &InitOptions { force: false }).expect("init");
    fs::write(&paths.approvals_path, "[not an object").expect("corrupt");

    let mut checklist = open_from_root(temp.path()).expect("open");
    assert!(checklist.is_degraded());

    let report = checklist.click("MAT1");
    assert_eq!(report.outcome, ToggleOutcome::Approved);
    assert!(!report.persisted);
    assert_eq!(
        fs::read_to_string(&paths.approvals_path).expect("read"),
        "[not an object"
    );
}

/// Every course without prerequisites stays unblocked through any click
/// sequence, and no approved course ever reports blocked.
#[test]
fn blocked_invariants_hold_across_click_sequence() {
    let mut checklist = Checklist::open(
        default_graph(),
        MemoryStore::new("approvedCourses"),
        FeedbackConfig::default(),
    );
    let clicks = [
        "ALG", "MAT1", "MAT2", "ALG", "PRG1", "EDD", "ALG", "MAT1", "FIS2", "FIS1", "MAT1",
        "FIS2", "MAT2",
    ];

    for code in clicks {
        let report = checklist.click(code);
        let engine = checklist.engine();
        for course in engine.graph().all() {
            let blocked = report.blocked[&course.code];
            if course.prerequisites.is_empty() {
                assert!(!blocked, "{} has no prerequisites", course.code);
            }
            let expected = !engine.is_approved(&course.code)
                && course
                    .prerequisites
                    .iter()
                    .any(|prerequisite| !engine.is_approved(prerequisite));
            assert_eq!(blocked, expected, "{} after clicking {code}", course.code);
        }
    }
}
