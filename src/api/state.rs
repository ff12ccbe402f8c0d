use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

/// Shared handler state. Handlers extract the connection directly with
/// `State<DatabaseConnection>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
}
