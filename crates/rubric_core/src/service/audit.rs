//! Human-readable notice describing the latest status change.

use crate::model::rubric::{ChecklistState, RubricResult};

/// Notice shown before any row has been cycled.
pub const INSTRUCTIONS: &str = "Click a status icon to cycle an item's review status.";

/// Projects the audit notice for `state`.
///
/// # Errors
/// - Returns `RubricError::PositionOutOfRange` when `last_update` points past
///   the list; a committed state never does.
pub fn update_notice(state: &ChecklistState) -> RubricResult<String> {
    let Some(position) = state.last_update else {
        return Ok(INSTRUCTIONS.to_string());
    };
    let item = state.items.get(position)?;
    Ok(format!("\"{}\" was marked {}.", item.title(), item.status()))
}
