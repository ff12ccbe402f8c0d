//! Semester progress aggregation over monthly lists.

use super::{
    lookup::{CompletionLookup, MissingElement},
    semester::Semester,
};
use crate::{
    entities::{InstallationType, MonthlyList, monthly_list},
    errors::Result,
};
use sea_orm::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Progress counters for one installation type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SemesterProgress {
    /// List items scheduled in the semester
    pub total: u64,
    /// Items whose live element is completed
    pub completed: u64,
}

/// Aggregates the lists of a semester into per-type progress.
///
/// Every list item counts once, even when the same element appears in
/// several lists. Items pointing at deleted elements count toward `total`
/// only. Installation types that appear in no list are absent from the map.
pub async fn get_semester_stats(
    db: &DatabaseConnection,
    semester: Semester,
    year: i32,
) -> Result<BTreeMap<InstallationType, SemesterProgress>> {
    let months = semester.months();
    let lists = MonthlyList::find()
        .filter(monthly_list::Column::Year.eq(year))
        .filter(monthly_list::Column::Month.between(*months.start(), *months.end()))
        .all(db)
        .await?;

    let ids: Vec<&str> = lists
        .iter()
        .flat_map(|l| l.items.0.iter().map(|i| i.element_id.as_str()))
        .collect();
    let lookup = CompletionLookup::load(db, &ids).await?;

    let mut stats: BTreeMap<InstallationType, SemesterProgress> = BTreeMap::new();
    for item in lists.iter().flat_map(|l| &l.items.0) {
        let entry = stats.entry(item.installation_type).or_default();
        entry.total += 1;
        if lookup.resolve(&item.element_id, item.completed, MissingElement::TreatAsIncomplete) {
            entry.completed += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element::delete_element;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_duplicate_items_count_per_list() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::PointMotors).await?;
        set_test_completion(&db, "e1", true).await?;

        save_test_list(
            &db,
            3,
            2024,
            vec![list_item("e1", InstallationType::PointMotors, false)],
        )
        .await?;
        save_test_list(
            &db,
            4,
            2024,
            vec![list_item("e1", InstallationType::PointMotors, false)],
        )
        .await?;

        let stats = get_semester_stats(&db, Semester::First, 2024).await?;
        assert_eq!(
            stats.get(&InstallationType::PointMotors),
            Some(&SemesterProgress {
                total: 2,
                completed: 2
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_semester_only_includes_its_months() -> Result<()> {
        let db = setup_test_db().await?;
        save_test_list(
            &db,
            6,
            2024,
            vec![list_item("a", InstallationType::Signals, false)],
        )
        .await?;
        save_test_list(
            &db,
            7,
            2024,
            vec![
                list_item("b", InstallationType::Signals, false),
                list_item("c", InstallationType::Batteries, false),
            ],
        )
        .await?;
        save_test_list(
            &db,
            2,
            2023,
            vec![list_item("d", InstallationType::Signals, false)],
        )
        .await?;

        let first = get_semester_stats(&db, Semester::First, 2024).await?;
        assert_eq!(first.len(), 1);
        assert_eq!(first[&InstallationType::Signals].total, 1);

        let second = get_semester_stats(&db, Semester::Second, 2024).await?;
        assert_eq!(second[&InstallationType::Signals].total, 1);
        assert_eq!(second[&InstallationType::Batteries].total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_element_counts_toward_total_only() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "gone", InstallationType::TrackCircuits).await?;
        create_test_element(&db, "kept", InstallationType::TrackCircuits).await?;
        set_test_completion(&db, "kept", true).await?;
        save_test_list(
            &db,
            9,
            2024,
            vec![
                list_item("gone", InstallationType::TrackCircuits, true),
                list_item("kept", InstallationType::TrackCircuits, false),
            ],
        )
        .await?;
        delete_element(&db, "gone").await?;

        let stats = get_semester_stats(&db, Semester::Second, 2024).await?;
        assert_eq!(
            stats[&InstallationType::TrackCircuits],
            SemesterProgress {
                total: 2,
                completed: 1
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_no_lists_is_empty() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_semester_stats(&db, Semester::First, 2030).await?.is_empty());
        Ok(())
    }
}
