//! Prerequisite checklist for academic courses.
//!
//! A user toggles courses as approved; a course may only be approved once all
//! of its prerequisites are. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (course graph, approval engine,
//!   catalog invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (catalog and approval files,
//!   config, board rendering).
//!
//! [`checklist`] coordinates the engine with an [`io::approval_store`]
//! backend, and [`validate`] backs the `checklist validate` command.

pub mod checklist;
pub mod core;
pub mod course;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
