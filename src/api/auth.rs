//! Caller identification and role checks.
//!
//! Requests name their user in the `x-user-id` header. The [`Caller`]
//! extractor loads that user, rejects unknown or unapproved accounts with 401
//! and accounts outside the route's [`RoleRequirement`] with 403.

use crate::{
    core::user::get_user_by_id,
    entities::{UserModel, UserRole},
    errors::Error,
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sea_orm::DatabaseConnection;
use std::marker::PhantomData;

/// Header carrying the id of the calling user.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Roles a route admits.
pub trait RoleRequirement {
    /// Roles admitted by the route
    const ALLOWED: &'static [UserRole];
}

/// Any approved user.
pub struct AnyMember;
impl RoleRequirement for AnyMember {
    const ALLOWED: &'static [UserRole] = &[UserRole::Admin, UserRole::Supervisor, UserRole::Agent];
}

/// Supervisors and administrators.
pub struct SupervisorOnly;
impl RoleRequirement for SupervisorOnly {
    const ALLOWED: &'static [UserRole] = &[UserRole::Admin, UserRole::Supervisor];
}

/// Administrators.
pub struct AdminOnly;
impl RoleRequirement for AdminOnly {
    const ALLOWED: &'static [UserRole] = &[UserRole::Admin];
}

/// The authenticated user behind a request, checked against `R`.
pub struct Caller<R: RoleRequirement> {
    /// The calling user, approved and within the required roles
    pub user: UserModel,
    _marker: PhantomData<R>,
}

impl<S, R> FromRequestParts<S> for Caller<R>
where
    DatabaseConnection: FromRef<S>,
    S: Send + Sync,
    R: RoleRequirement + Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::Unauthorized {
                reason: format!("missing {USER_ID_HEADER} header"),
            })?;

        let db = DatabaseConnection::from_ref(state);
        let user = get_user_by_id(&db, user_id)
            .await?
            .ok_or_else(|| Error::Unauthorized {
                reason: "unknown user".to_string(),
            })?;

        if !user.is_approved {
            return Err(Error::Unauthorized {
                reason: "account pending approval".to_string(),
            });
        }
        if !R::ALLOWED.contains(&user.role) {
            return Err(Error::Forbidden {
                role: user.role.to_string(),
            });
        }

        Ok(Self {
            user,
            _marker: PhantomData,
        })
    }
}
