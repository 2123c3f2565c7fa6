//! Validation helpers for the `.checklist/` layout, catalog, and approvals.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::checklist::load_graph;
use crate::io::approval_store::{ApprovalStore, JsonFileStore};
use crate::io::config::load_config;
use crate::io::init::ChecklistPaths;

/// High-level validation outcome. Warnings never fail validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOutcome {
    pub courses: usize,
    pub approved: usize,
    pub warnings: Vec<String>,
}

/// Validate `.checklist/` layout, config, catalog, and stored approvals.
pub fn validate_checklist(root: &Path) -> Result<ValidateOutcome> {
    let paths = ChecklistPaths::new(root);

    ensure_dir(&paths.checklist_dir)?;
    ensure_file(&paths.catalog_path)?;
    ensure_file(&paths.schema_path)?;

    let config = load_config(&paths.config_path).context("load config.toml")?;
    let graph = load_graph(&paths, &config)?;

    let mut warnings: Vec<String> = graph
        .dangling_prerequisites()
        .into_iter()
        .map(|dangling| {
            format!(
                "{}: unknown prerequisite '{}' is ignored",
                dangling.course, dangling.prerequisite
            )
        })
        .collect();
    warnings.extend(graph.repeated_prerequisites().into_iter().map(|repeated| {
        format!(
            "{}: prerequisite '{}' is listed more than once",
            repeated.course, repeated.prerequisite
        )
    }));

    let store = JsonFileStore::new(&paths.approvals_path, config.storage_key.as_str());
    let stored = store.load().context("load approved.json")?;
    let mut seen = HashSet::new();
    for code in &stored {
        if !graph.contains(code) {
            warnings.push(format!("stored approval '{code}' is not in the catalog"));
        } else if !seen.insert(code.as_str()) {
            warnings.push(format!("stored approval '{code}' is repeated"));
        }
    }
    let approved = seen.len();

    Ok(ValidateOutcome {
        courses: graph.len(),
        approved,
        warnings,
    })
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("missing directory {}", path.display()));
    }
    if !path.is_dir() {
        return Err(anyhow!("expected directory {}", path.display()));
    }
    Ok(())
}

fn ensure_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("missing file {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!("expected file {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::course::{Catalog, Course};
    use crate::io::catalog_store::write_catalog;
    use crate::io::config::{ChecklistConfig, write_config};
    use crate::io::init::{InitOptions, init_checklist};

    fn catalog_with_dangling() -> Catalog {
        Catalog {
            version: 1,
            courses: vec![
                Course::new("A", "Alpha", &[]),
                Course::new("B", "Beta", &["A", "GHOST"]),
            ],
        }
    }

    #[test]
    fn validate_ok_after_init() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_checklist(temp.path(), &InitOptions { force: false }).expect("init");

        let outcome = validate_checklist(temp.path()).expect("validate");
        assert_eq!(outcome.courses, 8);
        assert_eq!(outcome.approved, 0);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn validate_warns_on_dangling_and_unknown_approvals() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_checklist(temp.path(), &InitOptions { force: false }).expect("init");
        write_catalog(&paths.catalog_path, &catalog_with_dangling()).expect("catalog");
        fs::write(&paths.approvals_path, r#"{"approvedCourses": ["A", "OLD"]}"#)
            .expect("approvals");

        let outcome = validate_checklist(temp.path()).expect("validate");
        assert_eq!(outcome.approved, 1);
        assert_eq!(
            outcome.warnings,
            vec![
                "B: unknown prerequisite 'GHOST' is ignored".to_string(),
                "stored approval 'OLD' is not in the catalog".to_string(),
            ]
        );
    }

    #[test]
    fn validate_counts_repeated_approval_once() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_checklist(temp.path(), &InitOptions { force: false }).expect("init");
        fs::write(&paths.approvals_path, r#"{"approvedCourses": ["MAT1", "MAT1"]}"#)
            .expect("approvals");

        let outcome = validate_checklist(temp.path()).expect("validate");
        assert_eq!(outcome.approved, 1);
        assert_eq!(
            outcome.warnings,
            vec!["stored approval 'MAT1' is repeated".to_string()]
        );
    }

    #[test]
    fn validate_warns_on_repeated_prerequisite() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_checklist(temp.path(), &InitOptions { force: false }).expect("init");
        let catalog = Catalog {
            version: 1,
            courses: vec![
                Course::new("A", "Alpha", &[]),
                Course::from_attributes("B", "Beta", "A A"),
            ],
        };
        write_catalog(&paths.catalog_path, &catalog).expect("catalog");

        let outcome = validate_checklist(temp.path()).expect("validate");
        assert_eq!(outcome.courses, 2);
        assert_eq!(
            outcome.warnings,
            vec!["B: prerequisite 'A' is listed more than once".to_string()]
        );
    }

    #[test]
    fn validate_errors_on_dangling_in_strict_mode() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_checklist(temp.path(), &InitOptions { force: false }).expect("init");
        write_catalog(&paths.catalog_path, &catalog_with_dangling()).expect("catalog");
        let config = ChecklistConfig {
            strict_prerequisites: true,
            ..ChecklistConfig::default()
        };
        write_config(&paths.config_path, &config).expect("config");

        let err = validate_checklist(temp.path()).expect_err("should fail");
        assert!(format!("{err:#}").contains("unknown prerequisite 'GHOST'"));
    }

    #[test]
    fn validate_errors_on_missing_layout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = validate_checklist(temp.path()).expect_err("should fail");
        assert!(err.to_string().contains("missing directory"));
    }
}
