use crate::{
    api::{
        auth::{Caller, SupervisorOnly},
        extract::{ApiJson, ApiQuery},
    },
    core::roster::{self, RosterInput},
    errors::Result,
};
use axum::{Json, extract::State, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Query of `GET /roster`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    /// Sector of the roster
    pub sector_id: String,
    /// Month, 1 to 12
    pub month: i32,
    /// Calendar year
    pub year: i32,
}

/// Query of `GET /roster/stats`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStatsQuery {
    /// Sector whose rosters are counted
    pub sector_id: String,
    /// Calendar year
    pub year: i32,
}

/// Responds with `null` when the sector has no roster for the month.
pub async fn get_roster(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<RosterQuery>,
) -> Result<impl IntoResponse> {
    Ok(Json(
        roster::get_roster(&db, &query.sector_id, query.month, query.year).await?,
    ))
}

/// `POST /roster`
pub async fn save_roster(
    State(db): State<DatabaseConnection>,
    _caller: Caller<SupervisorOnly>,
    ApiJson(input): ApiJson<RosterInput>,
) -> Result<impl IntoResponse> {
    Ok(Json(roster::save_roster(&db, input).await?))
}

/// `GET /roster/stats`
pub async fn roster_stats(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<RosterStatsQuery>,
) -> Result<impl IntoResponse> {
    Ok(Json(
        roster::roster_stats(&db, &query.sector_id, query.year).await?,
    ))
}
