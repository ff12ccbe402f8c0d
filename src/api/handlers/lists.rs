//! Monthly lists and the semester statistics computed from them.

use crate::{
    api::{
        auth::{Caller, SupervisorOnly},
        extract::{ApiJson, ApiQuery},
        handlers::records::PeriodQuery,
    },
    core::{
        monthly_list::{self, MonthlyListInput},
        semester::Semester,
        stats,
    },
    errors::Result,
};
use axum::{Json, extract::State, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Query of `GET /stats`.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// 1 for January to June, 2 for July to December
    pub semester: i32,
    /// Calendar year
    pub year: i32,
}

/// Responds with `null` when no list exists for the period.
pub async fn get_list(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> Result<impl IntoResponse> {
    Ok(Json(
        monthly_list::get_monthly_list(&db, query.month, query.year).await?,
    ))
}

/// `POST /lists`
pub async fn save_list(
    State(db): State<DatabaseConnection>,
    _caller: Caller<SupervisorOnly>,
    ApiJson(input): ApiJson<MonthlyListInput>,
) -> Result<impl IntoResponse> {
    Ok(Json(monthly_list::save_monthly_list(&db, input).await?))
}

/// `GET /stats`
pub async fn semester_stats(
    State(db): State<DatabaseConnection>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> Result<impl IntoResponse> {
    let semester = Semester::try_from(query.semester)?;
    Ok(Json(
        stats::get_semester_stats(&db, semester, query.year).await?,
    ))
}
