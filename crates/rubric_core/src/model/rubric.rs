//! Rubric row and list domain model.
//!
//! # Responsibility
//! - Define the checklist row (`RubricItem`) and its ordered container.
//! - Provide the single status mutation path (`RubricList::with_status`).
//!
//! # Invariants
//! - `items[i].position == i` for every index; positions are never reassigned.
//! - Titles are non-blank and, like criteria, immutable after initialization.
//! - Item count is fixed once a list is initialized.

use crate::model::status::Status;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RubricResult<T> = Result<T, RubricError>;

/// Invariant violations of the checklist domain.
///
/// All variants indicate a broken caller/integration contract or corrupted
/// shared state. They are never expected during normal interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RubricError {
    /// A status label that is not part of the catalog.
    InvalidStatus(String),
    /// A position outside `0..len`.
    PositionOutOfRange { position: usize, len: usize },
    /// A row title that is blank after trim.
    EmptyTitle { position: usize },
    /// A stored row whose position does not match its index.
    PositionMismatch { index: usize, position: usize },
}

impl Display for RubricError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(label) => write!(f, "status label `{label}` is not cataloged"),
            Self::PositionOutOfRange { position, len } => {
                write!(f, "position {position} out of range for {len} rubric items")
            }
            Self::EmptyTitle { position } => {
                write!(f, "rubric item {position} must have a non-blank title")
            }
            Self::PositionMismatch { index, position } => write!(
                f,
                "rubric item at index {index} carries position {position}"
            ),
        }
    }
}

impl Error for RubricError {}

/// Caller-supplied description of one row, used at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub title: String,
    #[serde(default)]
    pub criteria: String,
}

impl ItemSpec {
    pub fn new(title: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            criteria: criteria.into(),
        }
    }
}

/// One checklist row.
///
/// Fields are private: identity and text are fixed at creation, and status
/// only changes by building a new list through `RubricList::with_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricItem {
    position: usize,
    title: String,
    criteria: String,
    status: Status,
}

impl RubricItem {
    /// Rebuilds a row from stored fields.
    ///
    /// Used by persistence paths; list-level checks run in
    /// `RubricList::from_items`.
    pub fn from_parts(
        position: usize,
        title: impl Into<String>,
        criteria: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            position,
            title: title.into(),
            criteria: criteria.into(),
            status,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn criteria(&self) -> &str {
        &self.criteria
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// Ordered, gap-free collection of rows for one checklist instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RubricItem>", into = "Vec<RubricItem>")]
pub struct RubricList {
    items: Vec<RubricItem>,
}

impl RubricList {
    /// Builds a fresh list from specs in order, every status `Undetermined`.
    ///
    /// # Errors
    /// - Returns `RubricError::EmptyTitle` when a spec title is blank.
    pub fn initialize(specs: &[ItemSpec]) -> RubricResult<Self> {
        let items = specs
            .iter()
            .enumerate()
            .map(|(position, spec)| {
                if spec.title.trim().is_empty() {
                    return Err(RubricError::EmptyTitle { position });
                }
                Ok(RubricItem::from_parts(
                    position,
                    spec.title.as_str(),
                    spec.criteria.as_str(),
                    Status::Undetermined,
                ))
            })
            .collect::<RubricResult<Vec<_>>>()?;
        Ok(Self { items })
    }

    /// Rebuilds a list from stored rows, validating structural invariants.
    ///
    /// # Errors
    /// - `RubricError::PositionMismatch` when rows are out of order or gapped.
    /// - `RubricError::EmptyTitle` when a stored title is blank.
    pub fn from_items(items: Vec<RubricItem>) -> RubricResult<Self> {
        for (index, item) in items.iter().enumerate() {
            if item.position != index {
                return Err(RubricError::PositionMismatch {
                    index,
                    position: item.position,
                });
            }
            if item.title.trim().is_empty() {
                return Err(RubricError::EmptyTitle { position: index });
            }
        }
        Ok(Self { items })
    }

    /// Returns a copy of this list with one row's status replaced.
    ///
    /// Every other row is carried over unchanged.
    ///
    /// # Errors
    /// - Returns `RubricError::PositionOutOfRange` for an invalid position.
    pub fn with_status(&self, position: usize, status: Status) -> RubricResult<Self> {
        self.get(position)?;
        let mut items = self.items.clone();
        items[position].status = status;
        Ok(Self { items })
    }

    /// Returns the row at `position`.
    ///
    /// # Errors
    /// - Returns `RubricError::PositionOutOfRange` for an invalid position.
    pub fn get(&self, position: usize) -> RubricResult<&RubricItem> {
        self.items
            .get(position)
            .ok_or(RubricError::PositionOutOfRange {
                position,
                len: self.items.len(),
            })
    }

    pub fn items(&self) -> &[RubricItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<Vec<RubricItem>> for RubricList {
    type Error = RubricError;

    fn try_from(value: Vec<RubricItem>) -> Result<Self, Self::Error> {
        Self::from_items(value)
    }
}

impl From<RubricList> for Vec<RubricItem> {
    fn from(value: RubricList) -> Self {
        value.items
    }
}

/// The two shared cells of one checklist: rows plus the audit pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistState {
    pub items: RubricList,
    /// Position most recently cycled; `None` before the first change.
    pub last_update: Option<usize>,
}

impl ChecklistState {
    /// Creates the initial state: fresh rows, no recorded change.
    pub fn new(items: RubricList) -> Self {
        Self {
            items,
            last_update: None,
        }
    }
}
