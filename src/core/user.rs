//! User account business logic
//!
//! Anyone may register; the account stays pending until an administrator
//! approves it. Rejecting a registration deletes it.

use crate::{
    entities::{User, UserRole, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Body of a registration request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    /// Employee number, unique per account
    pub matricula: String,
    /// Name shown in the interface
    pub full_name: String,
    /// Requested role; `AGENTE` when absent
    pub role: Option<UserRole>,
}

fn not_found(user_id: &str) -> Error {
    Error::NotFound {
        entity: "user",
        id: user_id.to_string(),
    }
}

/// Finds a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: &str) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by employee number.
pub async fn get_user_by_matricula(
    db: &DatabaseConnection,
    matricula: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Matricula.eq(matricula))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a pending account.
///
/// # Errors
/// * `Error::Validation` - empty fields or the matricula is already taken
#[instrument(skip(db, request), fields(matricula = %request.matricula))]
pub async fn register_user(db: &DatabaseConnection, request: RegisterUser) -> Result<user::Model> {
    let matricula = super::require("matricula", &request.matricula)?;
    let full_name = super::require("fullName", &request.full_name)?;

    if get_user_by_matricula(db, &matricula).await?.is_some() {
        return Err(Error::validation(format!(
            "matricula {matricula} is already registered"
        )));
    }

    let account = user::ActiveModel {
        id: Set(super::new_id()),
        matricula: Set(matricula),
        full_name: Set(full_name),
        role: Set(request.role.unwrap_or(UserRole::Agent)),
        is_approved: Set(false),
    };
    let created = account.insert(db).await?;
    info!(user_id = %created.id, "User registered, awaiting approval");
    Ok(created)
}

/// All accounts, by name.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Accounts awaiting approval.
pub async fn list_pending_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .filter(user::Column::IsApproved.eq(false))
        .order_by_asc(user::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Approves or rejects a registration.
///
/// # Returns
/// * `Ok(Some(user))` - the approved account
/// * `Ok(None)` - the registration was rejected and deleted
#[instrument(skip(db))]
pub async fn approve_user(
    db: &DatabaseConnection,
    user_id: &str,
    approve: bool,
) -> Result<Option<user::Model>> {
    let existing = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| not_found(user_id))?;

    if !approve {
        User::delete_by_id(user_id).exec(db).await?;
        info!("Registration rejected");
        return Ok(None);
    }

    let mut active_model: user::ActiveModel = existing.into();
    active_model.is_approved = Set(true);
    let approved = active_model.update(db).await?;
    info!("User approved");
    Ok(Some(approved))
}

/// Changes the role of an account.
pub async fn update_role(
    db: &DatabaseConnection,
    user_id: &str,
    role: UserRole,
) -> Result<user::Model> {
    let existing = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| not_found(user_id))?;
    let mut active_model: user::ActiveModel = existing.into();
    active_model.role = Set(role);
    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a user account.
pub async fn delete_user(db: &DatabaseConnection, user_id: &str) -> Result<()> {
    let result = User::delete_by_id(user_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(not_found(user_id));
    }
    Ok(())
}

/// Makes sure an approved administrator with this matricula exists.
///
/// An existing account with the same matricula is left as it is.
///
/// # Returns
/// * `Ok(true)` - the account was created
/// * `Ok(false)` - it already existed
pub async fn ensure_admin(db: &DatabaseConnection, matricula: &str, full_name: &str) -> Result<bool> {
    let matricula = super::require("matricula", matricula)?;
    if get_user_by_matricula(db, &matricula).await?.is_some() {
        return Ok(false);
    }

    let admin = user::ActiveModel {
        id: Set(super::new_id()),
        matricula: Set(matricula),
        full_name: Set(super::require("fullName", full_name)?),
        role: Set(UserRole::Admin),
        is_approved: Set(true),
    };
    let created = admin.insert(db).await?;
    info!(user_id = %created.id, "Bootstrap administrator created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    fn request(matricula: &str) -> RegisterUser {
        RegisterUser {
            matricula: matricula.to_string(),
            full_name: "Ana Ruiz".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_pending_agent() -> Result<()> {
        let db = setup_test_db().await?;
        let user = register_user(&db, request("9001")).await?;

        assert_eq!(user.role, UserRole::Agent);
        assert!(!user.is_approved);
        assert_eq!(list_pending_users(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_matricula_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        register_user(&db, request("9001")).await?;
        let result = register_user(&db, request(" 9001 ")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_approve_and_reject() -> Result<()> {
        let db = setup_test_db().await?;
        let kept = register_user(&db, request("1")).await?;
        let dropped = register_user(&db, request("2")).await?;

        let approved = approve_user(&db, &kept.id, true).await?.unwrap();
        assert!(approved.is_approved);

        assert!(approve_user(&db, &dropped.id, false).await?.is_none());
        assert!(get_user_by_id(&db, &dropped.id).await?.is_none());

        assert!(list_pending_users(&db).await?.is_empty());
        assert_eq!(list_users(&db).await?.len(), 1);

        let missing = approve_user(&db, &dropped.id, true).await;
        assert!(matches!(missing, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_role_and_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let user = register_user(&db, request("1")).await?;

        let promoted = update_role(&db, &user.id, UserRole::Supervisor).await?;
        assert_eq!(promoted.role, UserRole::Supervisor);

        delete_user(&db, &user.id).await?;
        assert!(matches!(
            delete_user(&db, &user.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(ensure_admin(&db, "srchicano", "SR CHICANO").await?);
        assert!(!ensure_admin(&db, "srchicano", "SR CHICANO").await?);

        let admin = get_user_by_matricula(&db, "srchicano").await?.unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.is_approved);
        Ok(())
    }
}
