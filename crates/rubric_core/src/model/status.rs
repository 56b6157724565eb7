//! Review status catalog.
//!
//! # Responsibility
//! - Define the fixed set of review outcomes a rubric row can hold.
//! - Encode the cyclic successor order used by status cycling.
//!
//! # Invariants
//! - The catalog has exactly four entries and is never mutated.
//! - `next` is a closed 4-cycle: no status is its own successor.
//! - Labels are unique and are the persisted identity of a status.

use crate::model::rubric::{RubricError, RubricResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One review outcome for a rubric row.
///
/// Serialized as its display label so persisted/wire values match what
/// collaborators see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Not reviewed yet. Initial state of every row.
    #[default]
    #[serde(rename = "Undetermined")]
    Undetermined,
    /// Row criteria are met.
    #[serde(rename = "Success")]
    Success,
    /// Row criteria are not met.
    #[serde(rename = "Failure")]
    Failure,
    /// Row does not apply to the reviewed object.
    #[serde(rename = "Not applicable")]
    NotApplicable,
}

impl Status {
    /// Returns the unique display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Undetermined => "Undetermined",
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::NotApplicable => "Not applicable",
        }
    }

    /// Returns the opaque icon reference handed to the rendering layer.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Undetermined => "status.undetermined",
            Self::Success => "status.success",
            Self::Failure => "status.failure",
            Self::NotApplicable => "status.not_applicable",
        }
    }

    /// Returns the following status in catalog order, wrapping at the end.
    pub fn next(self) -> Self {
        match self {
            Self::Undetermined => Self::Success,
            Self::Success => Self::Failure,
            Self::Failure => Self::NotApplicable,
            Self::NotApplicable => Self::Undetermined,
        }
    }

    /// Resolves a persisted label back to its catalog entry.
    ///
    /// # Errors
    /// - Returns `RubricError::InvalidStatus` for labels outside the catalog.
    pub fn from_label(label: &str) -> RubricResult<Self> {
        StatusCatalog::ALL
            .iter()
            .copied()
            .find(|status| status.label() == label)
            .ok_or_else(|| RubricError::InvalidStatus(label.to_string()))
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label-oriented view over the fixed status table.
pub struct StatusCatalog;

impl StatusCatalog {
    /// All statuses in cyclic order.
    pub const ALL: [Status; 4] = [
        Status::Undetermined,
        Status::Success,
        Status::Failure,
        Status::NotApplicable,
    ];

    /// Returns the status following `current_label`.
    ///
    /// # Errors
    /// - Returns `RubricError::InvalidStatus` when `current_label` is not
    ///   cataloged. Callers treat this as corrupted state.
    pub fn next(current_label: &str) -> RubricResult<Status> {
        Status::from_label(current_label).map(Status::next)
    }
}
