//! Checklist use-case service.
//!
//! # Responsibility
//! - Expose the interaction entry point (`cycle`) to rendering layers.
//! - Expose render-read snapshots of rows plus the audit notice.
//!
//! # Invariants
//! - Service APIs never write to the store except through `cycle_status`.
//! - Views are built from one committed state, never mixed snapshots.

use crate::model::rubric::ChecklistState;
use crate::service::audit::update_notice;
use crate::service::cycler::cycle_status;
use crate::store::{SharedStateStore, StoreResult};
use serde::Serialize;

/// Display data for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub position: usize,
    pub title: String,
    pub criteria: String,
    pub status_label: &'static str,
    /// Opaque icon reference resolved by the rendering layer.
    pub icon: &'static str,
}

/// Everything a viewer needs to render one checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistView {
    pub rows: Vec<RowView>,
    pub notice: String,
}

impl ChecklistView {
    /// Builds a view from one committed state.
    pub fn from_state(state: &ChecklistState) -> StoreResult<Self> {
        let rows = state
            .items
            .items()
            .iter()
            .map(|item| RowView {
                position: item.position(),
                title: item.title().to_string(),
                criteria: item.criteria().to_string(),
                status_label: item.status().label(),
                icon: item.status().icon(),
            })
            .collect();

        Ok(Self {
            rows,
            notice: update_notice(state)?,
        })
    }
}

/// Checklist facade over a shared store.
pub struct ChecklistService<S: SharedStateStore> {
    store: S,
}

impl<S: SharedStateStore> ChecklistService<S> {
    /// Creates service from store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Cycles the row at `position` and returns the view of the new state.
    pub fn cycle(&self, position: usize) -> StoreResult<ChecklistView> {
        let state = cycle_status(&self.store, position)?;
        ChecklistView::from_state(&state)
    }

    /// Returns the latest committed state.
    pub fn state(&self) -> StoreResult<ChecklistState> {
        self.store.read()
    }

    /// Returns the render-read view of the latest committed state.
    pub fn view(&self) -> StoreResult<ChecklistView> {
        let state = self.store.read()?;
        ChecklistView::from_state(&state)
    }

    /// Returns the current audit notice.
    pub fn notice(&self) -> StoreResult<String> {
        let state = self.store.read()?;
        Ok(update_notice(&state)?)
    }
}
