//! Shared test utilities for the maintenance service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        element::{self, NewElement},
        monthly_list::{self, MonthlyListInput},
        user::{self, RegisterUser},
    },
    entities::{self, InstallationType, ListItem, UserRole},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds an element creation request.
///
/// # Defaults
/// * station: "dos-hermanas"
/// * name: the id, upper-cased on creation
/// * data: empty payload
pub fn new_element(id: &str, kind: InstallationType) -> NewElement {
    NewElement {
        id: Some(id.to_string()),
        station_id: "dos-hermanas".to_string(),
        installation_type: kind,
        name: id.to_string(),
        is_completed: false,
        last_maintenance_date: None,
        data: serde_json::Value::Null,
    }
}

/// Creates a test element at "dos-hermanas" named after its id.
pub async fn create_test_element(
    db: &DatabaseConnection,
    id: &str,
    kind: InstallationType,
) -> Result<entities::element::Model> {
    element::create_element(db, new_element(id, kind)).await
}

/// Creates a test element at a given station.
pub async fn create_custom_element(
    db: &DatabaseConnection,
    id: &str,
    station_id: &str,
    kind: InstallationType,
) -> Result<entities::element::Model> {
    let mut new = new_element(id, kind);
    new.station_id = station_id.to_string();
    element::create_element(db, new).await
}

pub async fn set_test_completion(
    db: &DatabaseConnection,
    id: &str,
    completed: bool,
) -> Result<entities::element::Model> {
    element::set_completion(db, id, completed).await
}

/// List item for `element_id` with placeholder display fields.
pub fn list_item(element_id: &str, kind: InstallationType, completed: bool) -> ListItem {
    ListItem {
        element_id: element_id.to_string(),
        station_name: "DOS HERMANAS".to_string(),
        installation_type: kind,
        element_name: element_id.to_uppercase(),
        completed,
    }
}

/// Saves a monthly list, replacing any list of the same period.
pub async fn save_test_list(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
    items: Vec<ListItem>,
) -> Result<entities::monthly_list::Model> {
    monthly_list::save_monthly_list(
        db,
        MonthlyListInput {
            id: None,
            month,
            year,
            items,
        },
    )
    .await
}

/// Registers a user with the given role, approving it when asked.
pub async fn create_test_user(
    db: &DatabaseConnection,
    matricula: &str,
    role: UserRole,
    approved: bool,
) -> Result<entities::user::Model> {
    let created = user::register_user(
        db,
        RegisterUser {
            matricula: matricula.to_string(),
            full_name: format!("Test {matricula}"),
            role: Some(role),
        },
    )
    .await?;

    if !approved {
        return Ok(created);
    }
    match user::approve_user(db, &created.id, true).await? {
        Some(approved) => Ok(approved),
        None => Ok(created),
    }
}
