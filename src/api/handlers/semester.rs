use crate::{
    api::{
        auth::{AdminOnly, Caller},
        models::SemesterResetResponse,
    },
    core::semester,
    errors::Result,
};
use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Runs the same check as startup. A second call within the semester is a
/// no-op that reports `performed: false`.
pub async fn reset(
    State(db): State<DatabaseConnection>,
    caller: Caller<AdminOnly>,
) -> Result<impl IntoResponse> {
    let outcome = semester::process_semester_reset(&db, Utc::now()).await?;
    if let Some(result) = &outcome {
        info!(by = %caller.user.matricula, "{}", semester::format_semester_reset_summary(result));
    }
    Ok(Json(SemesterResetResponse::from(outcome)))
}
