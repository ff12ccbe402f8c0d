//! Monthly list business logic
//!
//! A monthly list names the elements scheduled for inspection in one calendar
//! month. Saving replaces the period's list wholesale. Reading reconciles the
//! cached `completed` flag of every item with the live element so callers
//! never see stale progress for elements that still exist.

use super::lookup::{CompletionLookup, MissingElement};
use crate::{
    entities::{ListItem, ListItems, MonthlyList, monthly_list},
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Body of a list save.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyListInput {
    /// Client-assigned id; generated when absent
    pub id: Option<String>,
    pub month: i32,
    pub year: i32,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

/// Returns the list of `(month, year)` with live completion flags, or `None`
/// when no list was saved for that period.
///
/// Items whose element no longer exists keep their stored flag.
pub async fn get_monthly_list(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Option<monthly_list::Model>> {
    super::validate_month(month)?;

    let Some(mut list) = MonthlyList::find()
        .filter(monthly_list::Column::Month.eq(month))
        .filter(monthly_list::Column::Year.eq(year))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let ids: Vec<&str> = list.items.0.iter().map(|i| i.element_id.as_str()).collect();
    let lookup = CompletionLookup::load(db, &ids).await?;
    for item in &mut list.items.0 {
        item.completed = lookup.resolve(&item.element_id, item.completed, MissingElement::KeepStored);
    }

    Ok(Some(list))
}

/// Replaces the list of the input's period.
///
/// Any list already stored for the same month and year is deleted in the same
/// transaction, so at most one list exists per period. Last write wins.
#[instrument(skip(db, input), fields(month = input.month, year = input.year))]
pub async fn save_monthly_list(
    db: &DatabaseConnection,
    input: MonthlyListInput,
) -> Result<monthly_list::Model> {
    super::validate_month(input.month)?;
    for item in &input.items {
        super::require("elementId", &item.element_id)?;
    }

    let requested_id = match input.id {
        Some(id) => Some(super::require("id", &id)?),
        None => None,
    };

    let txn = db.begin().await?;

    let replaced = MonthlyList::delete_many()
        .filter(monthly_list::Column::Month.eq(input.month))
        .filter(monthly_list::Column::Year.eq(input.year))
        .exec(&txn)
        .await?;

    // An id still taken after the delete belongs to another period's list.
    let id = match requested_id {
        Some(id) => {
            if MonthlyList::find_by_id(id.as_str()).one(&txn).await?.is_some() {
                warn!(requested_id = %id, "List id belongs to another period, assigning a new one");
                super::new_id()
            } else {
                id
            }
        }
        None => super::new_id(),
    };

    let item_count = input.items.len();
    let list = monthly_list::ActiveModel {
        id: Set(id),
        month: Set(input.month),
        year: Set(input.year),
        items: Set(ListItems(input.items)),
    };
    let saved = list.insert(&txn).await?;

    txn.commit().await?;

    info!(
        items = item_count,
        replaced = replaced.rows_affected,
        "Monthly list saved"
    );
    Ok(saved)
}
