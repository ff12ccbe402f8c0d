//! Semester reset business logic
//!
//! Every element carries an `is_completed` flag meaning "inspected during the
//! current semester". When a new semester starts (January 1 or July 1, UTC)
//! all flags are cleared. The timestamp of the last reset is tracked in the
//! `system_state` table so the reset fires at most once per semester no matter
//! how often the check runs.

use super::system_state::{get_system_state_value, set_system_state_value};
use crate::{
    entities::{Element, element},
    errors::{Error, Result},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::{TransactionTrait, prelude::*, sea_query::Expr};
use std::ops::RangeInclusive;
use tracing::{info, warn};

/// `system_state` key holding the RFC 3339 timestamp of the last reset.
pub const LAST_SEMESTER_RESET_KEY: &str = "last_semester_reset";

/// Half of a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semester {
    /// January through June
    First,
    /// July through December
    Second,
}

impl Semester {
    /// Months (1-12) covered by this semester.
    #[must_use]
    pub const fn months(self) -> RangeInclusive<i32> {
        match self {
            Self::First => 1..=6,
            Self::Second => 7..=12,
        }
    }

    /// Semester a given month (1-12) falls into.
    #[must_use]
    pub const fn of_month(month: u32) -> Self {
        if month >= 7 { Self::Second } else { Self::First }
    }

    const fn first_month(self) -> u32 {
        match self {
            Self::First => 1,
            Self::Second => 7,
        }
    }
}

impl TryFrom<i32> for Semester {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(Error::validation(format!(
                "semester must be 1 or 2, got {other}"
            ))),
        }
    }
}

/// Result of a semester reset that actually ran.
#[derive(Debug, Clone)]
pub struct SemesterResetResult {
    /// Number of elements whose flag was written
    pub elements_cleared: u64,
    /// How many of those were completed before the reset
    pub previously_completed: u64,
    /// Start of the semester the reset belongs to
    pub semester_start: DateTime<Utc>,
    /// Instant stored as the last reset
    pub reset_at: DateTime<Utc>,
}

/// First instant of the semester containing `now` (January 1 or July 1, UTC).
#[must_use]
pub fn semester_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let semester = Semester::of_month(now.month());
    #[allow(clippy::expect_used)]
    let first_day = NaiveDate::from_ymd_opt(now.year(), semester.first_month(), 1)
        .expect("First day of January or July is always valid");
    first_day.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Retrieves the timestamp of the last semester reset.
///
/// A stored value that does not parse as RFC 3339 is logged and treated as
/// absent, so the next check resets again.
///
/// # Returns
/// * `Ok(Some(instant))` - Last reset instant
/// * `Ok(None)` - No usable reset recorded
pub async fn get_last_semester_reset<C>(db: &C) -> Result<Option<DateTime<Utc>>>
where
    C: ConnectionTrait,
{
    let Some(raw) = get_system_state_value(db, LAST_SEMESTER_RESET_KEY).await? else {
        return Ok(None);
    };

    match DateTime::parse_from_rfc3339(&raw) {
        Ok(instant) => Ok(Some(instant.with_timezone(&Utc))),
        Err(e) => {
            warn!(value = %raw, error = %e, "Ignoring unparseable last semester reset");
            Ok(None)
        }
    }
}

/// Checks whether the completion flags must be cleared.
///
/// True when no reset was ever recorded or the last one happened strictly
/// before the start of the semester containing `now`.
pub async fn is_semester_reset_needed<C>(db: &C, now: DateTime<Utc>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let boundary = semester_start(now);
    Ok(get_last_semester_reset(db)
        .await?
        .is_none_or(|last| last < boundary))
}

/// Clears every element's completion flag if a new semester has started.
///
/// The flag update and the timestamp write run in one transaction. When the
/// transaction fails nothing is stored, so the next check retries.
///
/// # Returns
/// * `Ok(Some(result))` - Reset was performed
/// * `Ok(None)` - Already reset this semester
pub async fn process_semester_reset(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Option<SemesterResetResult>> {
    let txn = db.begin().await?;

    if !is_semester_reset_needed(&txn, now).await? {
        txn.rollback().await?;
        return Ok(None);
    }

    let previously_completed = Element::find()
        .filter(element::Column::IsCompleted.eq(true))
        .count(&txn)
        .await?;

    let cleared = Element::update_many()
        .col_expr(element::Column::IsCompleted, Expr::value(false))
        .exec(&txn)
        .await?;

    set_system_state_value(&txn, LAST_SEMESTER_RESET_KEY, now.to_rfc3339(), now).await?;

    txn.commit().await?;

    let result = SemesterResetResult {
        elements_cleared: cleared.rows_affected,
        previously_completed,
        semester_start: semester_start(now),
        reset_at: now,
    };
    info!(
        elements = result.elements_cleared,
        previously_completed = result.previously_completed,
        "Semester reset performed"
    );
    Ok(Some(result))
}

/// Formats a semester reset result into a one-line summary for logs.
#[must_use]
pub fn format_semester_reset_summary(result: &SemesterResetResult) -> String {
    let semester = match Semester::of_month(result.semester_start.month()) {
        Semester::First => "first",
        Semester::Second => "second",
    };
    format!(
        "Semester reset - {semester} semester of {} - cleared {} elements ({} were completed)",
        result.semester_start.year(),
        result.elements_cleared,
        result.previously_completed
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::element::get_element_by_id;
    use crate::entities::InstallationType;
    use crate::test_utils::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_semester_start() {
        assert_eq!(
            semester_start(at(2024, 3, 15)),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            semester_start(at(2024, 7, 1)),
            Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            semester_start(at(2024, 12, 31)),
            Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_semester_from_number() {
        assert_eq!(Semester::try_from(1).unwrap(), Semester::First);
        assert_eq!(Semester::try_from(2).unwrap().months(), 7..=12);
        assert!(matches!(
            Semester::try_from(3),
            Err(Error::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_first_check_resets_everything() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::Signals).await?;
        create_test_element(&db, "e2", InstallationType::Signals).await?;
        set_test_completion(&db, "e1", true).await?;

        assert!(is_semester_reset_needed(&db, at(2024, 3, 1)).await?);
        let result = process_semester_reset(&db, at(2024, 3, 1)).await?.unwrap();

        assert_eq!(result.elements_cleared, 2);
        assert_eq!(result.previously_completed, 1);
        assert!(!get_element_by_id(&db, "e1").await?.unwrap().is_completed);
        assert_eq!(
            get_last_semester_reset(&db).await?,
            Some(at(2024, 3, 1))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_is_idempotent_within_semester() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::Batteries).await?;

        process_semester_reset(&db, at(2024, 2, 1)).await?.unwrap();
        set_test_completion(&db, "e1", true).await?;

        assert!(process_semester_reset(&db, at(2024, 2, 1)).await?.is_none());
        assert!(process_semester_reset(&db, at(2024, 6, 30)).await?.is_none());
        assert!(get_element_by_id(&db, "e1").await?.unwrap().is_completed);
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_timestamp_triggers_reset() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::Batteries).await?;
        set_test_completion(&db, "e1", true).await?;
        set_system_state_value(
            &db,
            LAST_SEMESTER_RESET_KEY,
            at(2024, 5, 20).to_rfc3339(),
            at(2024, 5, 20),
        )
        .await?;

        assert!(!is_semester_reset_needed(&db, at(2024, 6, 1)).await?);
        assert!(is_semester_reset_needed(&db, at(2024, 8, 1)).await?);

        process_semester_reset(&db, at(2024, 8, 1)).await?.unwrap();
        assert!(!get_element_by_id(&db, "e1").await?.unwrap().is_completed);
        Ok(())
    }

    #[tokio::test]
    async fn test_boundary_instant_belongs_to_new_semester() -> Result<()> {
        let db = setup_test_db().await?;
        let boundary = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        set_system_state_value(
            &db,
            LAST_SEMESTER_RESET_KEY,
            boundary.to_rfc3339(),
            boundary,
        )
        .await?;

        assert!(!is_semester_reset_needed(&db, at(2024, 9, 1)).await?);

        let just_before = boundary - chrono::Duration::seconds(1);
        set_system_state_value(
            &db,
            LAST_SEMESTER_RESET_KEY,
            just_before.to_rfc3339(),
            just_before,
        )
        .await?;
        assert!(is_semester_reset_needed(&db, boundary).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_timestamp_counts_as_missing() -> Result<()> {
        let db = setup_test_db().await?;
        set_system_state_value(
            &db,
            LAST_SEMESTER_RESET_KEY,
            "yesterday".to_string(),
            at(2024, 1, 2),
        )
        .await?;

        assert_eq!(get_last_semester_reset(&db).await?, None);
        assert!(is_semester_reset_needed(&db, at(2024, 1, 3)).await?);
        Ok(())
    }

    #[test]
    fn test_format_summary() {
        let result = SemesterResetResult {
            elements_cleared: 12,
            previously_completed: 5,
            semester_start: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            reset_at: at(2025, 7, 2),
        };
        let summary = format_semester_reset_summary(&result);
        assert!(summary.contains("second semester of 2025"));
        assert!(summary.contains("cleared 12 elements"));
        assert!(summary.contains("5 were completed"));
    }
}
