//! Core domain logic for shared review checklists.
//! This crate is the single source of truth for checklist invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod template;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::rubric::{ChecklistState, ItemSpec, RubricError, RubricItem, RubricList, RubricResult};
pub use model::status::{Status, StatusCatalog};
pub use service::audit::{update_notice, INSTRUCTIONS};
pub use service::checklist_service::{ChecklistService, ChecklistView, RowView};
pub use service::cycler::cycle_status;
pub use store::{
    ChecklistId, InMemoryStore, SharedStateStore, SqliteStore, StoreError, StoreResult, Updater,
    SUBSCRIBER_BUFFER,
};
pub use template::{ChecklistTemplate, TemplateError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
