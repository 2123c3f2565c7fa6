//! Initialization helpers for `.checklist/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use super::approval_store::{ApprovalStore, JsonFileStore};
use super::catalog_store::write_catalog;
use super::config::{ChecklistConfig, write_config};
use crate::course::default_catalog;

const CATALOG_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/catalog/v1.schema.json"
));

/// All canonical paths within `.checklist/` for a project root.
#[derive(Debug, Clone)]
pub struct ChecklistPaths {
    pub root: PathBuf,
    pub checklist_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub schema_path: PathBuf,
    pub config_path: PathBuf,
    pub approvals_path: PathBuf,
}

impl ChecklistPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let checklist_dir = root.join(".checklist");
        Self {
            root,
            catalog_path: checklist_dir.join("catalog.json"),
            schema_path: checklist_dir.join("schema.json"),
            config_path: checklist_dir.join("config.toml"),
            approvals_path: checklist_dir.join("approved.json"),
            checklist_dir,
        }
    }
}

/// Options for `init_checklist`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing checklist files (including approvals).
    pub force: bool,
}

/// Create `.checklist/` scaffolding in `root` with a sample catalog.
///
/// Fails if `.checklist/` already exists unless `options.force` is set.
pub fn init_checklist(root: &Path, options: &InitOptions) -> Result<ChecklistPaths> {
    let paths = ChecklistPaths::new(root);
    if paths.checklist_dir.exists() && !paths.checklist_dir.is_dir() {
        return Err(anyhow!(
            "checklist init: .checklist exists but is not a directory"
        ));
    }
    if paths.checklist_dir.exists() && !options.force {
        return Err(anyhow!(
            "checklist init: .checklist already exists (use --force to overwrite)"
        ));
    }

    fs::create_dir_all(&paths.checklist_dir)
        .with_context(|| format!("create directory {}", paths.checklist_dir.display()))?;
    fs::write(&paths.schema_path, CATALOG_SCHEMA)
        .with_context(|| format!("write file {}", paths.schema_path.display()))?;
    write_catalog(&paths.catalog_path, &default_catalog())?;

    let config = ChecklistConfig::default();
    write_config(&paths.config_path, &config)?;
    JsonFileStore::new(&paths.approvals_path, config.storage_key.as_str())
        .save(&[])
        .context("write empty approvals")?;

    info!(root = %paths.root.display(), "checklist initialized");
    Ok(paths)
}
