//! Key/value bookkeeping stored in the `system_state` table.

use crate::{
    entities::{SystemState, system_state},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};

/// Reads the value stored under `key`, if any.
pub async fn get_system_state_value<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let state = SystemState::find_by_id(key).one(db).await?;
    Ok(state.map(|s| s.value))
}

/// Stores `value` under `key`, replacing any previous value.
///
/// # Arguments
/// * `db` - Database connection or open transaction
/// * `key` - State key
/// * `value` - Value to store
/// * `now` - Written to `updated_at`
pub async fn set_system_state_value<C>(
    db: &C,
    key: &str,
    value: String,
    now: DateTime<Utc>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let row = system_state::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_at: Set(now),
    };

    SystemState::insert(row)
        .on_conflict(
            OnConflict::column(system_state::Column::Key)
                .update_columns([system_state::Column::Value, system_state::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_missing_key_reads_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(get_system_state_value(&db, "nothing").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        set_system_state_value(&db, "k", "first".to_string(), now).await?;
        set_system_state_value(&db, "k", "second".to_string(), now).await?;

        assert_eq!(
            get_system_state_value(&db, "k").await?.as_deref(),
            Some("second")
        );
        assert_eq!(SystemState::find().count(&db).await?, 1);
        Ok(())
    }
}
