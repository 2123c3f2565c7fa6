//! Test-only helpers for constructing graphs, engines, and stores.

use std::sync::Arc;

use crate::core::engine::ApprovalEngine;
use crate::core::graph::CourseGraph;
use crate::course::Course;
use crate::io::approval_store::{ApprovalStore, StoreError};

/// Four courses: `A` and `D` are roots, `B` needs `A`, `C` needs `A` and `B`.
pub fn sample_courses() -> Vec<Course> {
    vec![
        Course::new("A", "Alpha", &[]),
        Course::new("B", "Beta", &["A"]),
        Course::new("C", "Gamma", &["A", "B"]),
        Course::new("D", "Delta", &[]),
    ]
}

/// `A` (no prerequisites) and `B` (requires `A`).
pub fn two_course_graph() -> Arc<CourseGraph> {
    let courses = vec![
        Course::new("A", "Alpha", &[]),
        Course::new("B", "Beta", &["A"]),
    ];
    Arc::new(CourseGraph::build(courses).expect("two-course graph"))
}

pub fn two_course_engine() -> ApprovalEngine {
    ApprovalEngine::new(two_course_graph())
}

/// Fresh engine over `courses` (permissive graph).
pub fn engine_for(courses: Vec<Course>) -> ApprovalEngine {
    ApprovalEngine::new(Arc::new(CourseGraph::build(courses).expect("graph")))
}

/// Store that fails reads and/or writes, counting write attempts.
#[derive(Debug, Default)]
pub struct FailingStore {
    fail_reads: bool,
    fail_writes: bool,
    save_attempts: usize,
}

impl FailingStore {
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn save_attempts(&self) -> usize {
        self.save_attempts
    }
}

impl ApprovalStore for FailingStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("scripted read failure".to_string()));
        }
        Ok(Vec::new())
    }

    fn save(&mut self, _codes: &[String]) -> Result<(), StoreError> {
        self.save_attempts += 1;
        if self.fail_writes {
            return Err(StoreError::Unavailable("scripted write failure".to_string()));
        }
        Ok(())
    }
}
