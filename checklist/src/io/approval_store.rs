//! Persistence seam for the approved-course list.
//!
//! The [`ApprovalStore`] trait decouples the checklist from the storage
//! backend. A store holds a single key whose value is the complete, ordered
//! list of approved course codes. Every write replaces the whole list.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Storage failures. The checklist treats every variant as "storage
/// unavailable" and keeps working in memory.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored approvals are malformed: {0}")]
    Malformed(String),
}

/// Abstraction over approval storage backends.
pub trait ApprovalStore {
    /// Read the stored list. A missing key yields an empty list.
    fn load(&self) -> Result<Vec<String>, StoreError>;

    /// Overwrite the stored list with `codes`.
    fn save(&mut self, codes: &[String]) -> Result<(), StoreError>;
}

/// Key-value store kept in memory. Values are JSON strings, mirroring a
/// browser's `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    key: String,
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: HashMap::new(),
        }
    }

    /// Raw stored value for `key`, if any.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ApprovalStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        match self.values.get(&self.key) {
            Some(raw) => parse_code_list(raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, codes: &[String]) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(codes).map_err(|err| StoreError::Unavailable(err.to_string()))?;
        self.values.insert(self.key.clone(), raw);
        Ok(())
    }
}

/// JSON file holding a top-level object of key-value pairs
/// (`.checklist/approved.json`). Unrelated keys are preserved on write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|err| {
            StoreError::Unavailable(format!("read {}: {}", self.path.display(), err))
        })?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Malformed(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
            Err(err) => Err(StoreError::Malformed(format!(
                "parse {}: {}",
                self.path.display(),
                err
            ))),
        }
    }
}

impl ApprovalStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        debug!(path = %self.path.display(), key = %self.key, "loading approvals");
        let object = self.read_object()?;
        let codes = match object.get(&self.key) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => code_list_from_value(value)?,
        };
        debug!(count = codes.len(), "approvals loaded");
        Ok(codes)
    }

    fn save(&mut self, codes: &[String]) -> Result<(), StoreError> {
        debug!(path = %self.path.display(), count = codes.len(), "writing approvals");
        // A malformed file is replaced wholesale; `Checklist::reset` relies on this.
        let mut object = self.read_object().unwrap_or_default();
        object.insert(
            self.key.clone(),
            Value::Array(codes.iter().cloned().map(Value::String).collect()),
        );
        let mut buf = serde_json::to_string_pretty(&Value::Object(object))
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        buf.push('\n');
        write_atomic(&self.path, &buf)
    }
}

fn parse_code_list(raw: &str) -> Result<Vec<String>, StoreError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| StoreError::Malformed(err.to_string()))?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    code_list_from_value(&value)
}

fn code_list_from_value(value: &Value) -> Result<Vec<String>, StoreError> {
    let items = value
        .as_array()
        .ok_or_else(|| StoreError::Malformed("approved list is not an array".to_string()))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| StoreError::Malformed(format!("non-string course code {item}")))
        })
        .collect()
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    let unavailable = |action: &str, target: &Path, err: std::io::Error| {
        StoreError::Unavailable(format!("{} {}: {}", action, target.display(), err))
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| unavailable("create directory", parent, err))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents).map_err(|err| unavailable("write", &tmp_path, err))?;
    fs::rename(&tmp_path, path).map_err(|err| unavailable("replace", path, err))?;
    Ok(())
}
