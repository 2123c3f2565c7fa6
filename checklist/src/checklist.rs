//! Orchestration of the engine and its approval store.
//!
//! A [`Checklist`] hydrates the engine from storage once, routes each click
//! through [`ApprovalEngine::toggle`], and writes the full approval list back
//! after every mutation. If storage fails, the checklist keeps running in
//! memory and reports a warning instead of failing the click.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::engine::ApprovalEngine;
use crate::core::graph::CourseGraph;
use crate::core::types::ToggleOutcome;
use crate::io::approval_store::{ApprovalStore, JsonFileStore, StoreError};
use crate::io::catalog_store::load_catalog;
use crate::io::config::{ChecklistConfig, FeedbackConfig, load_config};
use crate::io::init::ChecklistPaths;

/// Transient feedback for a rejected click. Adapters show the message and
/// pulse the course, then clear both once the durations elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub blocked_pulse: Duration,
    pub message_ttl: Duration,
}

/// Everything an adapter needs to update presentation after a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickReport {
    pub code: String,
    pub outcome: ToggleOutcome,
    /// Blocked flag for every course, recomputed after the click.
    pub blocked: HashMap<String, bool>,
    /// Present only for rejected clicks.
    pub feedback: Option<Feedback>,
    /// A successful approval hides any previous rejection message.
    pub clear_message: bool,
    /// True when the approval list was written to the store.
    pub persisted: bool,
}

pub struct Checklist<S: ApprovalStore> {
    engine: ApprovalEngine,
    store: S,
    feedback: FeedbackConfig,
    warning: Option<String>,
}

impl<S: ApprovalStore> Checklist<S> {
    /// Build the engine over `graph` and hydrate it from `store`.
    ///
    /// A failed read leaves the approval set empty and switches to
    /// memory-only mode.
    pub fn open(graph: Arc<CourseGraph>, store: S, feedback: FeedbackConfig) -> Self {
        let mut checklist = Self {
            engine: ApprovalEngine::new(graph),
            store,
            feedback,
            warning: None,
        };
        match checklist.store.load() {
            Ok(codes) => {
                let dropped = checklist.engine.hydrate(&codes);
                if !dropped.is_empty() {
                    debug!(?dropped, "ignored stored approvals");
                }
                info!(
                    approved = checklist.engine.approved().len(),
                    "approvals hydrated"
                );
            }
            Err(err) => checklist.degrade(err),
        }
        checklist
    }

    pub fn engine(&self) -> &ApprovalEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Non-blocking notice set once storage has failed.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }

    /// Handle a click on `code`.
    #[instrument(skip(self))]
    pub fn click(&mut self, code: &str) -> ClickReport {
        let outcome = self.engine.toggle(code);
        let persisted = outcome.mutated() && self.persist();

        let feedback = match &outcome {
            ToggleOutcome::Rejected(rejection) => {
                debug!(missing = ?rejection.missing_codes, "approval rejected");
                Some(Feedback {
                    message: rejection.message(),
                    blocked_pulse: self.feedback.blocked_pulse(),
                    message_ttl: self.feedback.message_ttl(),
                })
            }
            ToggleOutcome::UnknownCourse => {
                warn!(code, "click on unknown course ignored");
                None
            }
            ToggleOutcome::Approved | ToggleOutcome::Unapproved => None,
        };

        ClickReport {
            code: code.to_string(),
            clear_message: outcome == ToggleOutcome::Approved,
            outcome,
            blocked: self.engine.recompute_blocked(),
            feedback,
            persisted,
        }
    }

    /// Clear every approval. Returns true when the empty list was persisted.
    ///
    /// Unlike a click, reset writes even in degraded mode: it replaces a
    /// malformed stored value, and a successful write leaves degraded mode.
    pub fn reset(&mut self) -> bool {
        self.engine.hydrate(std::iter::empty::<&str>());
        let persisted = self.save();
        if persisted && self.warning.take().is_some() {
            info!("approval storage recovered by reset");
        }
        persisted
    }

    fn persist(&mut self) -> bool {
        if self.is_degraded() {
            return false;
        }
        self.save()
    }

    fn save(&mut self) -> bool {
        match self.store.save(self.engine.approved().codes()) {
            Ok(()) => true,
            Err(err) => {
                self.degrade(err);
                false
            }
        }
    }

    fn degrade(&mut self, err: StoreError) {
        warn!(error = %err, "approval storage unavailable; continuing in memory");
        self.warning = Some(format!(
            "{err}; los cambios no se guardarán en esta sesión"
        ));
    }
}

/// Load config and catalog under `root` and open the file-backed checklist.
pub fn open_from_root(root: &Path) -> Result<Checklist<JsonFileStore>> {
    let paths = ChecklistPaths::new(root);
    let config = load_config(&paths.config_path).context("load config.toml")?;
    let graph = load_graph(&paths, &config)?;
    let store = JsonFileStore::new(&paths.approvals_path, config.storage_key.as_str());
    Ok(Checklist::open(Arc::new(graph), store, config.feedback))
}

/// Load and validate the catalog, then build the graph under the configured
/// prerequisite policy.
pub fn load_graph(paths: &ChecklistPaths, config: &ChecklistConfig) -> Result<CourseGraph> {
    let catalog =
        load_catalog(&paths.schema_path, &paths.catalog_path).context("load catalog.json")?;
    let graph = CourseGraph::build_with_policy(catalog.courses, config.prerequisite_policy())
        .context("build course graph")?;
    Ok(graph)
}
