use crate::{
    api::{
        auth::{Caller, SupervisorOnly},
        extract::ApiJson,
    },
    core::agent,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Body of an agent creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAgent {
    /// Display name; stored upper-cased
    pub name: String,
    /// Sector the agent starts in, if any
    pub assigned_sector_id: Option<String>,
}

/// Body of a sector assignment. `{"sectorId": null}` clears the assignment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAssignment {
    /// New sector; `null` clears the assignment
    pub sector_id: Option<String>,
}

/// `GET /agents`
pub async fn list(State(db): State<DatabaseConnection>) -> Result<impl IntoResponse> {
    Ok(Json(agent::list_agents(&db).await?))
}

/// `POST /agents`
pub async fn create(
    State(db): State<DatabaseConnection>,
    _caller: Caller<SupervisorOnly>,
    ApiJson(request): ApiJson<NewAgent>,
) -> Result<impl IntoResponse> {
    let created = agent::create_agent(&db, &request.name, request.assigned_sector_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /agents/{id}/sector`
pub async fn assign_sector(
    State(db): State<DatabaseConnection>,
    _caller: Caller<SupervisorOnly>,
    Path(agent_id): Path<String>,
    ApiJson(request): ApiJson<SectorAssignment>,
) -> Result<impl IntoResponse> {
    Ok(Json(
        agent::assign_sector(&db, &agent_id, request.sector_id).await?,
    ))
}

/// `DELETE /agents/{id}`
pub async fn delete(
    State(db): State<DatabaseConnection>,
    _caller: Caller<SupervisorOnly>,
    Path(agent_id): Path<String>,
) -> Result<StatusCode> {
    agent::delete_agent(&db, &agent_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
