//! SQLite-backed implementation of `SharedStateStore`.
//!
//! # Responsibility
//! - Persist one checklist instance across `checklists` and `rubric_items`.
//! - Serialize commits from any number of connections on the same file.
//!
//! # Invariants
//! - Every commit runs in one `IMMEDIATE` transaction: the updater sees the
//!   rows as they are when the write lock is held.
//! - Read paths reject invalid persisted state instead of masking it.

use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use super::{check_transition, ChecklistId, SharedStateStore, StoreError, StoreResult, Updater};
use crate::model::rubric::{ChecklistState, RubricItem, RubricList};
use crate::model::status::Status;
use crate::template::ChecklistTemplate;

const ITEM_SELECT_SQL: &str = "SELECT
    position,
    title,
    criteria,
    status
FROM rubric_items
WHERE checklist_id = ?1
ORDER BY position ASC;";

/// Checklist cell persisted in SQLite.
///
/// Owns its connection; open one store per collaborator to share a file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    id: ChecklistId,
}

impl SqliteStore {
    /// Creates a brand-new checklist from `template` under a generated ID.
    pub fn create(conn: Connection, template: &ChecklistTemplate) -> StoreResult<Self> {
        Self::open_or_initialize(conn, Uuid::new_v4(), template)
    }

    /// Opens checklist `id`, seeding it from `template` only if it is absent.
    ///
    /// Concurrent callers racing on the same ID end up sharing one seeded
    /// checklist; the template is never applied over existing rows.
    pub fn open_or_initialize(
        mut conn: Connection,
        id: ChecklistId,
        template: &ChecklistTemplate,
    ) -> StoreResult<Self> {
        let items = template.to_list()?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        if checklist_exists(&tx, id)? {
            debug!("event=checklist_init module=store status=ok mode=existing checklist={id}");
        } else {
            insert_checklist(&tx, id, &items)?;
            info!(
                "event=checklist_init module=store status=ok mode=created checklist={id} items={}",
                items.len()
            );
        }
        tx.commit()?;

        Ok(Self {
            conn: Mutex::new(conn),
            id,
        })
    }

    /// Opens an existing checklist.
    ///
    /// # Errors
    /// - Returns `StoreError::NotFound` when `id` was never initialized.
    pub fn open(conn: Connection, id: ChecklistId) -> StoreResult<Self> {
        if !checklist_exists(&conn, id)? {
            return Err(StoreError::NotFound(id));
        }
        Ok(Self {
            conn: Mutex::new(conn),
            id,
        })
    }

    pub fn id(&self) -> ChecklistId {
        self.id
    }
}

impl SharedStateStore for SqliteStore {
    fn read(&self) -> StoreResult<ChecklistState> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let (state, _) = load_state(&tx, self.id)?;
        tx.commit()?;
        Ok(state)
    }

    fn commit(&self, updater: Updater<'_>) -> StoreResult<ChecklistState> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let (current, revision) = load_state(&tx, self.id)?;

        // Returning early drops `tx`, which rolls the transaction back.
        let next = updater(&current)?;
        check_transition(&current, &next)?;

        let next_revision = revision + 1;
        write_state(&tx, self.id, &current, &next, next_revision)?;
        tx.commit()?;

        debug!(
            "event=store_commit module=store status=ok backend=sqlite checklist={} revision={next_revision}",
            self.id
        );
        Ok(next)
    }

    fn revision(&self) -> StoreResult<u64> {
        let conn = self.conn.lock();
        let revision = conn
            .query_row(
                "SELECT revision FROM checklists WHERE id = ?1;",
                [self.id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .ok_or(StoreError::NotFound(self.id))?;
        revision_from_db(revision)
    }
}

fn checklist_exists(conn: &Connection, id: ChecklistId) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM checklists WHERE id = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn insert_checklist(conn: &Connection, id: ChecklistId, items: &RubricList) -> StoreResult<()> {
    let id_text = id.to_string();
    conn.execute(
        "INSERT INTO checklists (id, item_count, last_update, revision) VALUES (?1, ?2, NULL, 0);",
        params![id_text.as_str(), position_to_db(items.len())?],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO rubric_items (
            checklist_id,
            position,
            title,
            criteria,
            status
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
    )?;
    for item in items.items() {
        stmt.execute(params![
            id_text.as_str(),
            position_to_db(item.position())?,
            item.title(),
            item.criteria(),
            item.status().label(),
        ])?;
    }
    Ok(())
}

fn load_state(conn: &Connection, id: ChecklistId) -> StoreResult<(ChecklistState, u64)> {
    let id_text = id.to_string();
    let (item_count, last_update, revision) = conn
        .query_row(
            "SELECT item_count, last_update, revision FROM checklists WHERE id = ?1;",
            [id_text.as_str()],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<i64>>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )
        .optional()?
        .ok_or(StoreError::NotFound(id))?;

    let mut stmt = conn.prepare(ITEM_SELECT_SQL)?;
    let mut rows = stmt.query([id_text.as_str()])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        let position = position_from_db(row.get("position")?, "rubric_items.position")?;
        let label: String = row.get("status")?;
        items.push(RubricItem::from_parts(
            position,
            row.get::<_, String>("title")?,
            row.get::<_, String>("criteria")?,
            Status::from_label(&label)?,
        ));
    }

    let item_count = position_from_db(item_count, "checklists.item_count")?;
    if items.len() != item_count {
        return Err(StoreError::InvalidData(format!(
            "checklist {id} has {} rubric items, expected {item_count}",
            items.len()
        )));
    }

    let items = RubricList::from_items(items)?;
    let last_update = last_update
        .map(|value| position_from_db(value, "checklists.last_update"))
        .transpose()?;
    if let Some(position) = last_update {
        items.get(position)?;
    }

    Ok((
        ChecklistState { items, last_update },
        revision_from_db(revision)?,
    ))
}

fn write_state(
    conn: &Connection,
    id: ChecklistId,
    current: &ChecklistState,
    next: &ChecklistState,
    revision: u64,
) -> StoreResult<()> {
    let id_text = id.to_string();
    let mut stmt = conn.prepare(
        "UPDATE rubric_items
         SET status = ?1
         WHERE checklist_id = ?2 AND position = ?3;",
    )?;
    for (before, after) in current.items.items().iter().zip(next.items.items()) {
        if before.status() == after.status() {
            continue;
        }
        stmt.execute(params![
            after.status().label(),
            id_text.as_str(),
            position_to_db(after.position())?,
        ])?;
    }

    let last_update = next.last_update.map(position_to_db).transpose()?;
    let revision = i64::try_from(revision)
        .map_err(|_| StoreError::InvalidData(format!("revision {revision} overflows")))?;
    conn.execute(
        "UPDATE checklists
         SET
            last_update = ?1,
            revision = ?2,
            updated_at = (strftime('%s', 'now') * 1000)
         WHERE id = ?3;",
        params![last_update, revision, id_text.as_str()],
    )?;
    Ok(())
}

fn position_to_db(position: usize) -> StoreResult<i64> {
    i64::try_from(position)
        .map_err(|_| StoreError::InvalidData(format!("position {position} overflows")))
}

fn position_from_db(value: i64, column: &str) -> StoreResult<usize> {
    usize::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid position `{value}` in {column}")))
}

fn revision_from_db(value: i64) -> StoreResult<u64> {
    u64::try_from(value).map_err(|_| {
        StoreError::InvalidData(format!("invalid revision `{value}` in checklists.revision"))
    })
}
