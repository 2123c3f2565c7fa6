//! Prerequisite-consistency engine.
//!
//! Owns the approval set and derives blocked status from it. The engine never
//! performs I/O; persistence is handled by [`crate::checklist::Checklist`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::graph::CourseGraph;
use crate::core::types::{CourseState, CourseStatus, Rejection, ToggleOutcome};
use crate::course::Course;

/// Ordered approval set. Order is approval order, which is also the
/// persisted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalState {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ApprovalState {
    pub fn contains(&self, code: &str) -> bool {
        self.members.contains(code)
    }

    fn insert(&mut self, code: &str) -> bool {
        if !self.members.insert(code.to_string()) {
            return false;
        }
        self.order.push(code.to_string());
        true
    }

    fn remove(&mut self, code: &str) -> bool {
        if !self.members.remove(code) {
            return false;
        }
        self.order.retain(|existing| existing != code);
        true
    }

    pub fn codes(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Engine over a shared, immutable [`CourseGraph`].
#[derive(Debug, Clone)]
pub struct ApprovalEngine {
    graph: Arc<CourseGraph>,
    approved: ApprovalState,
}

impl ApprovalEngine {
    pub fn new(graph: Arc<CourseGraph>) -> Self {
        Self {
            graph,
            approved: ApprovalState::default(),
        }
    }

    pub fn graph(&self) -> &CourseGraph {
        &self.graph
    }

    pub fn approved(&self) -> &ApprovalState {
        &self.approved
    }

    /// Approved codes in approval order.
    pub fn approved_codes(&self) -> Vec<String> {
        self.approved.codes().to_vec()
    }

    /// Replace the approval set with `codes`, keeping only known courses and
    /// the first occurrence of each. Returns the codes that were dropped.
    pub fn hydrate<I, S>(&mut self, codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.approved = ApprovalState::default();
        let mut dropped = Vec::new();
        for code in codes {
            let code = code.as_ref();
            if !self.graph.contains(code) || !self.approved.insert(code) {
                dropped.push(code.to_string());
            }
        }
        dropped
    }

    pub fn is_approved(&self, code: &str) -> bool {
        self.approved.contains(code)
    }

    /// Declared prerequisites of `code` that are known and not approved, in
    /// declaration order. Unknown prerequisite codes count as satisfied.
    pub fn missing_prerequisites(&self, code: &str) -> Vec<String> {
        match self.graph.lookup(code) {
            Some(course) => self.missing_for(course),
            None => Vec::new(),
        }
    }

    fn missing_for(&self, course: &Course) -> Vec<String> {
        course
            .prerequisites
            .iter()
            .filter(|prerequisite| {
                self.graph.contains(prerequisite) && !self.approved.contains(prerequisite)
            })
            .cloned()
            .collect()
    }

    /// Approve `code` if all its prerequisites are approved.
    ///
    /// Callers route already-approved courses to [`Self::request_toggle_off`];
    /// approving an approved course is a no-op that still reports `Approved`.
    pub fn request_approve(&mut self, code: &str) -> ToggleOutcome {
        let Some(course) = self.graph.lookup(code) else {
            return ToggleOutcome::UnknownCourse;
        };
        let missing = self.missing_for(course);
        if !missing.is_empty() {
            let missing_names = missing
                .iter()
                .map(|code| self.graph.display_name(code).to_string())
                .collect();
            return ToggleOutcome::Rejected(Rejection {
                code: course.code.clone(),
                name: course.name.clone(),
                missing_codes: missing,
                missing_names,
            });
        }
        self.approved.insert(code);
        ToggleOutcome::Approved
    }

    /// Remove `code` from the approval set. Dependents stay approved.
    pub fn request_toggle_off(&mut self, code: &str) -> ToggleOutcome {
        self.approved.remove(code);
        ToggleOutcome::Unapproved
    }

    /// Single entry point for a click on `code`.
    pub fn toggle(&mut self, code: &str) -> ToggleOutcome {
        if !self.graph.contains(code) {
            return ToggleOutcome::UnknownCourse;
        }
        if self.is_approved(code) {
            self.request_toggle_off(code)
        } else {
            self.request_approve(code)
        }
    }

    pub fn is_blocked(&self, code: &str) -> bool {
        match self.graph.lookup(code) {
            Some(course) => self.blocked(course),
            None => false,
        }
    }

    fn blocked(&self, course: &Course) -> bool {
        !self.approved.contains(&course.code) && !self.missing_for(course).is_empty()
    }

    /// Blocked flag for every course in the graph.
    pub fn recompute_blocked(&self) -> HashMap<String, bool> {
        self.graph
            .all()
            .map(|course| (course.code.clone(), self.blocked(course)))
            .collect()
    }

    pub fn state_of(&self, code: &str) -> Option<CourseState> {
        self.graph.lookup(code).map(|course| self.state_for(course))
    }

    fn state_for(&self, course: &Course) -> CourseState {
        if self.approved.contains(&course.code) {
            CourseState::Approved
        } else if self.blocked(course) {
            CourseState::Blocked
        } else {
            CourseState::Unblocked
        }
    }

    /// Per-course derived state in catalog order.
    pub fn statuses(&self) -> Vec<CourseStatus> {
        self.graph
            .all()
            .map(|course| {
                let state = self.state_for(course);
                CourseStatus {
                    code: course.code.clone(),
                    name: course.name.clone(),
                    state,
                    inconsistent: state == CourseState::Approved
                        && !self.missing_for(course).is_empty(),
                }
            })
            .collect()
    }
}
