use crate::{
    api::{
        auth::{AdminOnly, Caller},
        extract::ApiJson,
    },
    core::user::{self, RegisterUser},
    entities::UserRole,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::info;

/// Body of an approval decision.
#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    /// `true` approves, `false` rejects and deletes the account
    pub approve: bool,
}

/// Body of a role change.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    /// New role
    pub role: UserRole,
}

/// Open to anyone; the new account starts pending.
pub async fn register(
    State(db): State<DatabaseConnection>,
    ApiJson(request): ApiJson<RegisterUser>,
) -> Result<impl IntoResponse> {
    let created = user::register_user(&db, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /users`
pub async fn list_users(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AdminOnly>,
) -> Result<impl IntoResponse> {
    Ok(Json(user::list_users(&db).await?))
}

/// `GET /users/pending`
pub async fn list_pending(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AdminOnly>,
) -> Result<impl IntoResponse> {
    Ok(Json(user::list_pending_users(&db).await?))
}

/// Returns the approved user, or 204 when the registration was rejected.
pub async fn approve(
    State(db): State<DatabaseConnection>,
    caller: Caller<AdminOnly>,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<ApprovalRequest>,
) -> Result<Response> {
    let outcome = user::approve_user(&db, &user_id, request.approve).await?;
    info!(admin = %caller.user.matricula, user_id = %user_id, approve = request.approve, "Registration reviewed");
    Ok(match outcome {
        Some(approved) => Json(approved).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// `PATCH /users/{id}/role`
pub async fn update_role(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AdminOnly>,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<RoleRequest>,
) -> Result<impl IntoResponse> {
    Ok(Json(user::update_role(&db, &user_id, request.role).await?))
}

/// `DELETE /users/{id}`
pub async fn delete(
    State(db): State<DatabaseConnection>,
    _caller: Caller<AdminOnly>,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    user::delete_user(&db, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
