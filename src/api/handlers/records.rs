//! Maintenance log, fault log and the reports built from them.

use crate::{
    api::{
        auth::{AnyMember, Caller},
        extract::{ApiJson, ApiQuery},
        models::{MaintenanceResponse, ReportRowResponse},
    },
    core::{
        fault::{self, NewFaultRecord},
        maintenance::{self, NewMaintenanceRecord},
        report,
    },
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Query selecting the records of one element.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementQuery {
    /// Element whose history is returned
    pub element_id: String,
}

/// Query of `GET /reports/daily`.
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// Day of the report
    pub date: NaiveDate,
    /// Restrict to one turn
    pub turn: Option<String>,
}

/// Query of `GET /reports/monthly`.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Month, 1 to 12
    pub month: i32,
    /// Calendar year
    pub year: i32,
}

/// `GET /maintenance`
pub async fn maintenance_history(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<ElementQuery>,
) -> Result<impl IntoResponse> {
    let records = maintenance::maintenance_history(&db, &query.element_id).await?;
    Ok(Json(
        records
            .into_iter()
            .map(MaintenanceResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `POST /maintenance`
pub async fn add_maintenance(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AnyMember>,
    ApiJson(new): ApiJson<NewMaintenanceRecord>,
) -> Result<impl IntoResponse> {
    let saved = maintenance::add_maintenance(&db, new).await?;
    Ok((StatusCode::CREATED, Json(MaintenanceResponse::from(saved))))
}

/// `DELETE /maintenance/{id}`
pub async fn delete_maintenance(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AnyMember>,
    Path(record_id): Path<String>,
) -> Result<StatusCode> {
    maintenance::delete_maintenance(&db, &record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /faults`
pub async fn fault_history(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<ElementQuery>,
) -> Result<impl IntoResponse> {
    Ok(Json(fault::fault_history(&db, &query.element_id).await?))
}

/// `POST /faults`
pub async fn add_fault(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AnyMember>,
    ApiJson(new): ApiJson<NewFaultRecord>,
) -> Result<impl IntoResponse> {
    let saved = fault::add_fault(&db, new).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `DELETE /faults/{id}`
pub async fn delete_fault(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AnyMember>,
    Path(record_id): Path<String>,
) -> Result<StatusCode> {
    fault::delete_fault(&db, &record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// An empty `turn` means the whole day.
pub async fn daily_report(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<DailyQuery>,
) -> Result<impl IntoResponse> {
    let turn = query.turn.as_deref().filter(|t| !t.is_empty());
    let rows = report::daily_report(&db, query.date, turn).await?;
    Ok(Json(
        rows.into_iter()
            .map(ReportRowResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /reports/monthly`
pub async fn monthly_report(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> Result<impl IntoResponse> {
    let rows = report::monthly_report(&db, query.month, query.year).await?;
    Ok(Json(
        rows.into_iter()
            .map(ReportRowResponse::from)
            .collect::<Vec<_>>(),
    ))
}
