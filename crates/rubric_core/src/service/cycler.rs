//! Status cycling, the only write path into a shared checklist.
//!
//! # Invariants
//! - The current status is read inside the store updater, never from a
//!   snapshot taken before the commit.
//! - A failed cycle commits nothing.

use crate::model::rubric::{ChecklistState, RubricResult};
use crate::store::{SharedStateStore, StoreResult};
use log::{error, info};

/// Advances the status at `position` and records it as the latest change.
///
/// # Errors
/// - `RubricError::PositionOutOfRange` (wrapped in `StoreError::Rubric`) for
///   an invalid position.
/// - Store read/commit failures.
pub fn cycle_status(
    store: &(impl SharedStateStore + ?Sized),
    position: usize,
) -> StoreResult<ChecklistState> {
    let updater = |state: &ChecklistState| advance(state, position);

    match store.commit(&updater) {
        Ok(state) => {
            let status = state.items.get(position)?.status();
            info!(
                "event=status_cycle module=service status=ok position={position} new_status={status:?}"
            );
            Ok(state)
        }
        Err(err) => {
            error!(
                "event=status_cycle module=service status=error position={position} error={err}"
            );
            Err(err)
        }
    }
}

/// Pure transition used as the commit updater.
pub fn advance(state: &ChecklistState, position: usize) -> RubricResult<ChecklistState> {
    let current = state.items.get(position)?.status();
    let items = state.items.with_status(position, current.next())?;
    Ok(ChecklistState {
        items,
        last_update: Some(position),
    })
}
