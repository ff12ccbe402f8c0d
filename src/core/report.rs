//! Report generation business logic.
//!
//! Daily and monthly maintenance reports list the records of a period joined
//! with the name and station of the inspected element. Records whose element
//! was deleted are still reported, with the element fields left empty.

use crate::{
    entities::{Element, MaintenanceRecord, element, maintenance_record},
    errors::{Error, Result},
};
use chrono::{Months, NaiveDate};
use sea_orm::{QueryOrder, QuerySelect, prelude::*};
use std::collections::{HashMap, HashSet};

/// A maintenance record with display fields of its element.
#[derive(Debug, Clone)]
pub struct ReportRow {
    /// The record being reported
    pub record: maintenance_record::Model,
    /// Name of the element, when it still exists
    pub element_name: Option<String>,
    /// Station of the element, when it still exists
    pub station_id: Option<String>,
}

/// Maintenance records done on `date`, optionally restricted to one shift.
///
/// # Arguments
/// * `db` - Database connection
/// * `date` - Day of the report
/// * `turn` - Shift name to filter on, or `None` for the whole day
pub async fn daily_report(
    db: &DatabaseConnection,
    date: NaiveDate,
    turn: Option<&str>,
) -> Result<Vec<ReportRow>> {
    let mut query = MaintenanceRecord::find().filter(maintenance_record::Column::Date.eq(date));
    if let Some(turn) = turn {
        query = query.filter(maintenance_record::Column::Turn.eq(turn));
    }
    let records = query
        .order_by_asc(maintenance_record::Column::Turn)
        .all(db)
        .await?;

    join_elements(db, records).await
}

/// Maintenance records done during one calendar month, oldest first.
pub async fn monthly_report(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<ReportRow>> {
    super::validate_month(month)?;
    let first = u32::try_from(month)
        .ok()
        .and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
        .ok_or_else(|| Error::validation(format!("invalid period {month}/{year}")))?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| Error::validation(format!("invalid period {month}/{year}")))?;

    let records = MaintenanceRecord::find()
        .filter(maintenance_record::Column::Date.gte(first))
        .filter(maintenance_record::Column::Date.lt(next))
        .order_by_asc(maintenance_record::Column::Date)
        .all(db)
        .await?;

    join_elements(db, records).await
}

async fn join_elements(
    db: &DatabaseConnection,
    records: Vec<maintenance_record::Model>,
) -> Result<Vec<ReportRow>> {
    let ids: HashSet<&str> = records.iter().map(|r| r.element_id.as_str()).collect();
    let elements: HashMap<String, (String, String)> = if ids.is_empty() {
        HashMap::new()
    } else {
        Element::find()
            .select_only()
            .column(element::Column::Id)
            .column(element::Column::Name)
            .column(element::Column::StationId)
            .filter(element::Column::Id.is_in(ids))
            .into_tuple::<(String, String, String)>()
            .all(db)
            .await?
            .into_iter()
            .map(|(id, name, station_id)| (id, (name, station_id)))
            .collect()
    };

    Ok(records
        .into_iter()
        .map(|record| {
            let found = elements.get(&record.element_id).cloned();
            ReportRow {
                element_name: found.as_ref().map(|(name, _)| name.clone()),
                station_id: found.map(|(_, station_id)| station_id),
                record,
            }
        })
        .collect())
}
