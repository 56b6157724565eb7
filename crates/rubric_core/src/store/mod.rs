//! Shared checklist state stores.
//!
//! # Responsibility
//! - Define the synchronized cell contract every collaborator reads from
//!   and commits to.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Commits are atomic read-modify-write against the latest value.
//! - A failed updater leaves the stored state and revision untouched.
//! - Readers only ever observe fully committed states.
//! - Item count, titles and criteria never change through a commit.
//! - Stores return failed commits without logging them; the calling
//!   service reports each failure once.

use crate::db::DbError;
use crate::model::rubric::{ChecklistState, RubricError, RubricResult};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

mod memory;
mod sqlite;

pub use memory::{InMemoryStore, SUBSCRIBER_BUFFER};
pub use sqlite::SqliteStore;

/// Stable identifier of one persisted checklist instance.
pub type ChecklistId = Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Updater applied by `SharedStateStore::commit` to the latest state.
pub type Updater<'a> = &'a dyn Fn(&ChecklistState) -> RubricResult<ChecklistState>;

/// Errors from shared store reads and commits.
#[derive(Debug)]
pub enum StoreError {
    /// Domain invariant violation raised by an updater or by stored data.
    Rubric(RubricError),
    Db(DbError),
    NotFound(ChecklistId),
    InvalidData(String),
    /// Updater tried to change something other than statuses and audit pointer.
    IllegalUpdate(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rubric(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "checklist not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted checklist data: {message}"),
            Self::IllegalUpdate(message) => write!(f, "illegal checklist update: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rubric(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::IllegalUpdate(_) => None,
        }
    }
}

impl From<RubricError> for StoreError {
    fn from(value: RubricError) -> Self {
        Self::Rubric(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronized multi-reader/multi-writer cell holding one checklist.
///
/// Implementations serialize commits one at a time; each commit sees the
/// result of every commit that completed before it.
pub trait SharedStateStore: Send + Sync {
    /// Returns the latest committed state.
    fn read(&self) -> StoreResult<ChecklistState>;

    /// Applies `updater` to the latest state and stores its result atomically.
    ///
    /// Returns the newly committed state.
    fn commit(&self, updater: Updater<'_>) -> StoreResult<ChecklistState>;

    /// Returns the number of successful commits so far.
    fn revision(&self) -> StoreResult<u64>;
}

impl<T: SharedStateStore + ?Sized> SharedStateStore for Arc<T> {
    fn read(&self) -> StoreResult<ChecklistState> {
        (**self).read()
    }

    fn commit(&self, updater: Updater<'_>) -> StoreResult<ChecklistState> {
        (**self).commit(updater)
    }

    fn revision(&self) -> StoreResult<u64> {
        (**self).revision()
    }
}

/// Rejects updater results that break the fixed-shape contract.
pub(crate) fn check_transition(current: &ChecklistState, next: &ChecklistState) -> StoreResult<()> {
    if current.items.len() != next.items.len() {
        return Err(StoreError::IllegalUpdate(format!(
            "item count changed from {} to {}",
            current.items.len(),
            next.items.len()
        )));
    }

    for (before, after) in current.items.items().iter().zip(next.items.items()) {
        if before.title() != after.title() || before.criteria() != after.criteria() {
            return Err(StoreError::IllegalUpdate(format!(
                "text of rubric item {} changed",
                before.position()
            )));
        }
    }

    if let Some(position) = next.last_update {
        next.items.get(position)?;
    }

    Ok(())
}
