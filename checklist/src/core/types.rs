//! Shared deterministic types for checklist core logic.
//!
//! These types define stable contracts between the engine and its adapters.
//! They should not depend on external state or I/O.

use serde::{Deserialize, Serialize};

/// Derived per-course state. Never stored; recomputed from the approval set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseState {
    /// Not approved and every known prerequisite is approved.
    Unblocked,
    /// Not approved and at least one known prerequisite is not approved.
    Blocked,
    Approved,
}

/// A toggle that was refused because prerequisites are missing.
///
/// Carries both codes and resolved display names so adapters can render the
/// rejection without consulting the graph again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub code: String,
    pub name: String,
    pub missing_codes: Vec<String>,
    pub missing_names: Vec<String>,
}

impl Rejection {
    /// User-facing rejection message.
    pub fn message(&self) -> String {
        format!(
            "No puedes aprobar \"{}\" porque te faltan los siguientes ramos: {}.",
            self.name,
            self.missing_names.join(", ")
        )
    }
}

/// Result of a single toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Approved,
    Unapproved,
    Rejected(Rejection),
    /// The code is not in the graph; nothing changed.
    UnknownCourse,
}

impl ToggleOutcome {
    /// True when the approval set changed.
    pub fn mutated(&self) -> bool {
        matches!(self, Self::Approved | Self::Unapproved)
    }
}

/// Ordered per-course view used by presentation adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseStatus {
    pub code: String,
    pub name: String,
    pub state: CourseState,
    /// Approved while some known prerequisite is not (unapproval does not cascade).
    pub inconsistent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_lists_missing_names() {
        let rejection = Rejection {
            code: "ALG".to_string(),
            name: "Algoritmos".to_string(),
            missing_codes: vec!["EDD".to_string(), "MAT2".to_string()],
            missing_names: vec!["Estructuras de Datos".to_string(), "Cálculo II".to_string()],
        };
        assert_eq!(
            rejection.message(),
            "No puedes aprobar \"Algoritmos\" porque te faltan los siguientes ramos: Estructuras de Datos, Cálculo II."
        );
    }

    #[test]
    fn only_approve_and_unapprove_mutate() {
        assert!(ToggleOutcome::Approved.mutated());
        assert!(ToggleOutcome::Unapproved.mutated());
        assert!(!ToggleOutcome::UnknownCourse.mutated());
    }
}
