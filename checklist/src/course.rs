use serde::{Deserialize, Serialize};

/// A single course as declared in the catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>, prerequisites: &[&str]) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            prerequisites: prerequisites.iter().map(|code| code.to_string()).collect(),
        }
    }

    /// Build a course from markup-style attributes, where prerequisites are a
    /// space-delimited list of codes (`"MAT1 FIS1"`).
    pub fn from_attributes(code: &str, name: &str, prerequisites: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            prerequisites: parse_prerequisites(prerequisites),
        }
    }
}

/// Split a space-delimited prerequisite attribute into codes.
pub fn parse_prerequisites(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// On-disk catalog document (`.checklist/catalog.json`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    pub version: u32,
    pub courses: Vec<Course>,
}

pub fn default_catalog() -> Catalog {
    Catalog {
        version: 1,
        courses: vec![
            Course::new("MAT1", "Cálculo I", &[]),
            Course::new("FIS1", "Física I", &[]),
            Course::new("PRG1", "Programación", &[]),
            Course::new("MAT2", "Cálculo II", &["MAT1"]),
            Course::new("FIS2", "Física II", &["FIS1", "MAT1"]),
            Course::new("EDD", "Estructuras de Datos", &["PRG1"]),
            Course::new("MAT3", "Cálculo III", &["MAT2"]),
            Course::new("ALG", "Algoritmos", &["EDD", "MAT2"]),
        ],
    }
}
