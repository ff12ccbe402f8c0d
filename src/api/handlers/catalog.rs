use crate::{api::extract::ApiQuery, core::catalog, errors::Result};
use axum::{Json, extract::State, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Query of `GET /stations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationFilter {
    /// Restrict to one sector
    pub sector_id: Option<String>,
}

/// `GET /sectors`
pub async fn sectors(State(db): State<DatabaseConnection>) -> Result<impl IntoResponse> {
    Ok(Json(catalog::list_sectors(&db).await?))
}

/// `GET /stations`
pub async fn stations(
    State(db): State<DatabaseConnection>,
    ApiQuery(filter): ApiQuery<StationFilter>,
) -> Result<impl IntoResponse> {
    Ok(Json(
        catalog::list_stations(&db, filter.sector_id.as_deref()).await?,
    ))
}
