//! Semantic catalog invariants not expressible via JSON Schema.

use std::collections::{HashMap, HashSet};

use crate::course::Catalog;

/// Check semantic invariants not expressible in JSON Schema:
/// - No duplicate course codes
/// - No course lists itself as a prerequisite
/// - No prerequisite cycles (a cycle makes every member unapprovable)
///
/// Dangling and repeated prerequisite codes are not errors; see
/// [`crate::core::graph::CourseGraph::dangling_prerequisites`] and
/// [`crate::core::graph::CourseGraph::repeated_prerequisites`].
pub fn validate_invariants(catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for course in &catalog.courses {
        if !seen.insert(course.code.as_str()) {
            errors.push(format!("duplicate course code '{}'", course.code));
        }

        if course.prerequisites.contains(&course.code) {
            errors.push(format!("{}: lists itself as a prerequisite", course.code));
        }
    }

    errors.extend(find_cycles(catalog));
    errors
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Report each prerequisite cycle once, as `a -> b -> a`.
fn find_cycles(catalog: &Catalog) -> Vec<String> {
    let edges: HashMap<&str, Vec<&str>> = catalog
        .courses
        .iter()
        .map(|course| {
            let prerequisites = course
                .prerequisites
                .iter()
                .map(String::as_str)
                .filter(|prerequisite| *prerequisite != course.code)
                .collect();
            (course.code.as_str(), prerequisites)
        })
        .collect();

    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut errors = Vec::new();
    for course in &catalog.courses {
        let mut stack = Vec::new();
        visit(course.code.as_str(), &edges, &mut marks, &mut stack, &mut errors);
    }
    errors
}

fn visit<'a>(
    code: &'a str,
    edges: &HashMap<&'a str, Vec<&'a str>>,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    errors: &mut Vec<String>,
) {
    match marks.get(code) {
        Some(Mark::Done) => return,
        Some(Mark::Visiting) => {
            if let Some(start) = stack.iter().position(|entry| *entry == code) {
                let mut cycle: Vec<&str> = stack[start..].to_vec();
                cycle.push(code);
                errors.push(format!("prerequisite cycle: {}", cycle.join(" -> ")));
            }
            return;
        }
        None => {}
    }

    let Some(next) = edges.get(code) else {
        return;
    };
    marks.insert(code, Mark::Visiting);
    stack.push(code);
    for &prerequisite in next {
        visit(prerequisite, edges, marks, stack, errors);
    }
    stack.pop();
    marks.insert(code, Mark::Done);
}
