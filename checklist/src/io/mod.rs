//! I/O helpers for checklist commands.

pub mod approval_store;
pub mod catalog_store;
pub mod config;
pub mod init;
pub mod render;
