//! Checklist templates used to seed new checklist instances.
//!
//! # Responsibility
//! - Provide the built-in design-system component checklist.
//! - Load caller-supplied templates from JSON.
//!
//! # Invariants
//! - A template that loads successfully always initializes a valid list.

use crate::model::rubric::{ItemSpec, RubricError, RubricList, RubricResult};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const DEFAULT_CRITERIA: &str = "Criteria for a passing item can be listed here";
const DEFAULT_TITLES: [&str; 5] = [
    "All layers and frames have meaningful names",
    "Item title 2",
    "Item title 3",
    "Item title 4",
    "Item title 5",
];

/// Errors from template loading.
#[derive(Debug)]
pub enum TemplateError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(RubricError),
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read template: {err}"),
            Self::Parse(err) => write!(f, "failed to parse template: {err}"),
            Self::Invalid(err) => write!(f, "invalid template: {err}"),
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TemplateError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RubricError> for TemplateError {
    fn from(value: RubricError) -> Self {
        Self::Invalid(value)
    }
}

/// Ordered row specs for a new checklist.
///
/// JSON shape: `{"items": [{"title": "...", "criteria": "..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub items: Vec<ItemSpec>,
}

impl Default for ChecklistTemplate {
    fn default() -> Self {
        Self {
            items: DEFAULT_TITLES
                .iter()
                .map(|title| ItemSpec::new(*title, DEFAULT_CRITERIA))
                .collect(),
        }
    }
}

impl ChecklistTemplate {
    pub fn new(items: Vec<ItemSpec>) -> Self {
        Self { items }
    }

    /// Parses and validates a JSON template.
    pub fn from_json_str(json: &str) -> Result<Self, TemplateError> {
        let template: Self = serde_json::from_str(json)?;
        template.validate()?;
        Ok(template)
    }

    /// Reads, parses and validates a JSON template file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks that the template initializes a valid list.
    pub fn validate(&self) -> RubricResult<()> {
        RubricList::initialize(&self.items).map(|_| ())
    }

    /// Builds the initial rubric list for this template.
    pub fn to_list(&self) -> RubricResult<RubricList> {
        RubricList::initialize(&self.items)
    }
}
