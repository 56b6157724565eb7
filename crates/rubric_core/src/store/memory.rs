//! In-memory implementation of `SharedStateStore`.
//!
//! State lives behind one mutex; committed states are pushed to subscribed
//! viewers. All state is lost when the store is dropped.

use std::sync::mpsc::{self, Receiver, SyncSender};

use log::debug;
use parking_lot::Mutex;

use super::{check_transition, SharedStateStore, StoreResult, Updater};
use crate::model::rubric::ChecklistState;

/// Committed states buffered per viewer before it is unsubscribed.
pub const SUBSCRIBER_BUFFER: usize = 16;

struct Cell {
    state: ChecklistState,
    revision: u64,
    subscribers: Vec<SyncSender<ChecklistState>>,
}

/// Mutex-guarded checklist cell shared by in-process collaborators.
pub struct InMemoryStore {
    cell: Mutex<Cell>,
}

impl InMemoryStore {
    /// Creates a store holding `initial` at revision 0.
    pub fn new(initial: ChecklistState) -> Self {
        Self {
            cell: Mutex::new(Cell {
                state: initial,
                revision: 0,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Registers a viewer that receives every state committed from now on.
    ///
    /// Dropping the receiver unsubscribes on the next commit. A viewer that
    /// falls [`SUBSCRIBER_BUFFER`] states behind is unsubscribed too: it can
    /// drain what was buffered, then sees the channel disconnect and should
    /// `read()` and subscribe again.
    pub fn subscribe(&self) -> Receiver<ChecklistState> {
        let (tx, rx) = mpsc::sync_channel(SUBSCRIBER_BUFFER);
        self.cell.lock().subscribers.push(tx);
        rx
    }
}

impl SharedStateStore for InMemoryStore {
    fn read(&self) -> StoreResult<ChecklistState> {
        Ok(self.cell.lock().state.clone())
    }

    fn commit(&self, updater: Updater<'_>) -> StoreResult<ChecklistState> {
        let mut cell = self.cell.lock();

        let next = updater(&cell.state)?;
        check_transition(&cell.state, &next)?;

        cell.state = next.clone();
        cell.revision += 1;
        cell.subscribers
            .retain(|subscriber| subscriber.try_send(next.clone()).is_ok());

        debug!(
            "event=store_commit module=store status=ok backend=memory revision={} subscribers={}",
            cell.revision,
            cell.subscribers.len()
        );
        Ok(next)
    }

    fn revision(&self) -> StoreResult<u64> {
        Ok(self.cell.lock().revision)
    }
}
