//! Immutable course graph built once per session.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::course::Course;

/// Errors raised while building a [`CourseGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate course code '{code}'")]
    DuplicateCourse { code: String },

    #[error("course '{course}' references unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite {
        course: String,
        prerequisite: String,
    },
}

/// How to treat prerequisite codes that do not name a course in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrerequisitePolicy {
    /// Ignore dangling references (they never block).
    #[default]
    Permissive,
    /// Reject the catalog at build time.
    Strict,
}

/// A single `course -> prerequisite` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteRef {
    pub course: String,
    pub prerequisite: String,
}

/// All courses keyed by code, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct CourseGraph {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl CourseGraph {
    /// Build a permissive graph. Fails only on duplicate codes.
    pub fn build(courses: Vec<Course>) -> Result<Self, GraphError> {
        Self::build_with_policy(courses, PrerequisitePolicy::Permissive)
    }

    pub fn build_with_policy(
        courses: Vec<Course>,
        policy: PrerequisitePolicy,
    ) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(courses.len());
        for (position, course) in courses.iter().enumerate() {
            if index.insert(course.code.clone(), position).is_some() {
                return Err(GraphError::DuplicateCourse {
                    code: course.code.clone(),
                });
            }
        }

        let graph = Self { courses, index };
        if policy == PrerequisitePolicy::Strict {
            if let Some(dangling) = graph.dangling_prerequisites().into_iter().next() {
                return Err(GraphError::UnknownPrerequisite {
                    course: dangling.course,
                    prerequisite: dangling.prerequisite,
                });
            }
        }
        Ok(graph)
    }

    pub fn lookup(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&position| &self.courses[position])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All courses in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Display name for `code`, falling back to the raw code.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.lookup(code).map_or(code, |course| course.name.as_str())
    }

    /// Every prerequisite reference that names no course, in declaration order.
    pub fn dangling_prerequisites(&self) -> Vec<PrerequisiteRef> {
        self.courses
            .iter()
            .flat_map(|course| {
                course
                    .prerequisites
                    .iter()
                    .filter(|prerequisite| !self.contains(prerequisite))
                    .map(|prerequisite| PrerequisiteRef {
                        course: course.code.clone(),
                        prerequisite: prerequisite.clone(),
                    })
            })
            .collect()
    }

    /// Prerequisites a course lists more than once, reported once per course
    /// and code. Repeats are harmless to the engine.
    pub fn repeated_prerequisites(&self) -> Vec<PrerequisiteRef> {
        let mut repeated = Vec::new();
        for course in &self.courses {
            let mut listed = HashSet::new();
            let mut reported = HashSet::new();
            for prerequisite in &course.prerequisites {
                if !listed.insert(prerequisite.as_str()) && reported.insert(prerequisite.as_str())
                {
                    repeated.push(PrerequisiteRef {
                        course: course.code.clone(),
                        prerequisite: prerequisite.clone(),
                    });
                }
            }
        }
        repeated
    }

    /// Courses that directly list `code` as a prerequisite.
    pub fn dependents(&self, code: &str) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| course.prerequisites.iter().any(|p| p == code))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_courses;

    #[test]
    fn build_preserves_insertion_order() {
        let graph = CourseGraph::build(sample_courses()).expect("build");
        let codes: Vec<&str> = graph.all().map(|course| course.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn build_rejects_duplicate_codes() {
        let courses = vec![
            Course::new("A", "Alpha", &[]),
            Course::new("A", "Alpha again", &[]),
        ];
        let err = CourseGraph::build(courses).expect_err("duplicate should fail");
        assert_eq!(
            err,
            GraphError::DuplicateCourse {
                code: "A".to_string()
            }
        );
    }

    #[test]
    fn lookup_unknown_returns_none() {
        let graph = CourseGraph::build(sample_courses()).expect("build");
        assert!(graph.lookup("ZZZ").is_none());
        assert_eq!(graph.lookup("B").map(|c| c.name.as_str()), Some("Beta"));
    }

    #[test]
    fn dangling_prerequisites_listed_in_declaration_order() {
        let courses = vec![
            Course::new("A", "Alpha", &["X"]),
            Course::new("B", "Beta", &["A", "Y"]),
        ];
        let graph = CourseGraph::build(courses).expect("permissive build");
        let dangling: Vec<(String, String)> = graph
            .dangling_prerequisites()
            .into_iter()
            .map(|d| (d.course, d.prerequisite))
            .collect();
        assert_eq!(
            dangling,
            vec![
                ("A".to_string(), "X".to_string()),
                ("B".to_string(), "Y".to_string())
            ]
        );
    }

    #[test]
    fn repeated_prerequisites_reported_once() {
        let courses = vec![
            Course::new("A", "Alpha", &[]),
            Course::from_attributes("B", "Beta", "A A A"),
        ];
        let graph = CourseGraph::build(courses).expect("build");
        let repeated: Vec<(String, String)> = graph
            .repeated_prerequisites()
            .into_iter()
            .map(|r| (r.course, r.prerequisite))
            .collect();
        assert_eq!(repeated, vec![("B".to_string(), "A".to_string())]);
    }

    #[test]
    fn strict_policy_rejects_dangling_prerequisite() {
        let courses = vec![Course::new("A", "Alpha", &["X"])];
        let err = CourseGraph::build_with_policy(courses, PrerequisitePolicy::Strict)
            .expect_err("strict should fail");
        assert!(matches!(err, GraphError::UnknownPrerequisite { .. }));
        assert!(err.to_string().contains("unknown prerequisite 'X'"));
    }

    #[test]
    fn dependents_lists_direct_dependents_only() {
        let graph = CourseGraph::build(sample_courses()).expect("build");
        let codes: Vec<&str> = graph
            .dependents("A")
            .into_iter()
            .map(|course| course.code.as_str())
            .collect();
        assert_eq!(codes, vec!["B", "C"]);
    }

    #[test]
    fn display_name_falls_back_to_code() {
        let graph = CourseGraph::build(sample_courses()).expect("build");
        assert_eq!(graph.display_name("A"), "Alpha");
        assert_eq!(graph.display_name("nope"), "nope");
    }
}
