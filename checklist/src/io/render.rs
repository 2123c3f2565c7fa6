//! Text rendering of the checklist board.

use anyhow::Result;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::core::engine::ApprovalEngine;
use crate::core::types::CourseState;

const BOARD_TEMPLATE: &str = include_str!("templates/board.txt");

/// Per-course row passed to the template.
#[derive(Debug, Clone, Serialize)]
struct CourseRow {
    marker: &'static str,
    code: String,
    name: String,
    missing: Vec<String>,
    inconsistent: bool,
}

fn marker(state: CourseState) -> &'static str {
    match state {
        CourseState::Approved => "[x]",
        CourseState::Blocked => "[#]",
        CourseState::Unblocked => "[ ]",
    }
}

/// Render the board: one line per course in catalog order, then a summary.
///
/// `warning` is shown below the summary (e.g. storage degraded).
pub fn render_board(engine: &ApprovalEngine, warning: Option<&str>) -> Result<String> {
    let rows: Vec<CourseRow> = engine
        .statuses()
        .into_iter()
        .map(|status| {
            let missing = if status.state == CourseState::Blocked {
                engine
                    .missing_prerequisites(&status.code)
                    .iter()
                    .map(|code| engine.graph().display_name(code).to_string())
                    .collect()
            } else {
                Vec::new()
            };
            CourseRow {
                marker: marker(status.state),
                code: status.code,
                name: status.name,
                missing,
                inconsistent: status.inconsistent,
            }
        })
        .collect();

    let mut env = Environment::new();
    env.add_template("board", BOARD_TEMPLATE)?;
    let rendered = env.get_template("board")?.render(context! {
        courses => rows,
        approved => engine.approved().len(),
        total => engine.graph().len(),
        warning => warning,
    })?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::two_course_engine;

    #[test]
    fn board_marks_blocked_and_lists_missing_names() {
        let engine = two_course_engine();
        let board = render_board(&engine, None).expect("render");
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[ ] A  Alpha",
                "[#] B  Beta  (faltan: Alpha)",
                "0/2 ramos aprobados"
            ]
        );
    }

    #[test]
    fn board_flags_inconsistent_approval_and_warning() {
        let mut engine = two_course_engine();
        engine.toggle("A");
        engine.toggle("B");
        engine.toggle("A");

        let board = render_board(&engine, Some("storage unavailable")).expect("render");
        assert!(board.contains("[x] B  Beta  (prerrequisitos desaprobados)"));
        assert!(board.contains("1/2 ramos aprobados"));
        assert!(board.ends_with("aviso: storage unavailable"));
    }
}
