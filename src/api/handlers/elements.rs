use crate::{
    api::{
        auth::{AnyMember, Caller, SupervisorOnly},
        extract::{ApiJson, ApiQuery},
        models::ElementResponse,
    },
    core::element::{self, ElementPatch, NewElement},
    entities::InstallationType,
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
use tracing::info;

/// Query of `GET /elements`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFilter {
    /// Restrict to one station
    pub station_id: Option<String>,
    /// Restrict to one installation type
    #[serde(rename = "type")]
    pub installation_type: Option<InstallationType>,
}

/// Query of `GET /elements/counts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountFilter {
    /// Station whose elements are counted
    pub station_id: String,
}

/// `GET /elements`
pub async fn list(
    State(db): State<DatabaseConnection>,
    ApiQuery(filter): ApiQuery<ElementFilter>,
) -> Result<impl IntoResponse> {
    let elements =
        element::list_elements(&db, filter.station_id.as_deref(), filter.installation_type)
            .await?;
    Ok(Json(
        elements
            .into_iter()
            .map(ElementResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /elements/counts`
pub async fn counts(
    State(db): State<DatabaseConnection>,
    ApiQuery(filter): ApiQuery<CountFilter>,
) -> Result<impl IntoResponse> {
    Ok(Json(
        element::count_elements_by_type(&db, &filter.station_id).await?,
    ))
}

/// `POST /elements`
pub async fn create(
    State(db): State<DatabaseConnection>,
    caller: Caller<AnyMember>,
    ApiJson(new): ApiJson<NewElement>,
) -> Result<impl IntoResponse> {
    let created = element::create_element(&db, new).await?;
    info!(by = %caller.user.matricula, element_id = %created.id, "Element created via API");
    Ok((StatusCode::CREATED, Json(ElementResponse::from(created))))
}

/// `PUT /elements/{id}`
pub async fn update(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AnyMember>,
    Path(element_id): Path<String>,
    ApiJson(patch): ApiJson<ElementPatch>,
) -> Result<impl IntoResponse> {
    let updated = element::update_element(&db, &element_id, patch).await?;
    Ok(Json(ElementResponse::from(updated)))
}

/// `POST /elements/{id}/toggle`
pub async fn toggle(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AnyMember>,
    Path(element_id): Path<String>,
) -> Result<impl IntoResponse> {
    let toggled = element::toggle_completion(&db, &element_id).await?;
    Ok(Json(ElementResponse::from(toggled)))
}

/// `DELETE /elements/{id}`
pub async fn delete(
    State(db): State<DatabaseConnection>,
    _caller: Caller<SupervisorOnly>,
    Path(element_id): Path<String>,
) -> Result<StatusCode> {
    element::delete_element(&db, &element_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
