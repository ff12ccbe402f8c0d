//! Core business logic - framework-agnostic operations over the store.
//!
//! Every function takes a `SeaORM` connection and returns [`crate::errors::Result`].
//! The HTTP layer in `crate::api` is a thin translation on top of these.

/// Agent records and sector assignment
pub mod agent;
/// Sectors, stations and startup seeding
pub mod catalog;
/// Element store
pub mod element;
/// Fault log
pub mod fault;
/// Live completion lookups with explicit fallbacks for missing elements
pub mod lookup;
/// Maintenance log
pub mod maintenance;
/// Monthly inspection lists with read-time reconciliation
pub mod monthly_list;
/// Daily and monthly maintenance reports
pub mod report;
/// Monthly shift rosters
pub mod roster;
/// Semester boundaries and the completion reset
pub mod semester;
/// Semester progress aggregation
pub mod stats;
/// Key/value system state
pub mod system_state;
/// User registration, approval and roles
pub mod user;

/// Generates an id for records the server creates itself.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Rejects months outside 1-12.
pub(crate) fn validate_month(month: i32) -> crate::errors::Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(crate::errors::Error::validation(format!(
            "month must be between 1 and 12, got {month}"
        )))
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require(field: &str, value: &str) -> crate::errors::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::errors::Error::validation(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(trimmed.to_string())
}
