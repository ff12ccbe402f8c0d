//! Maintenance log business logic
//!
//! A maintenance record captures one inspection of one element, including a
//! snapshot of the technical data entered on the form. Submitting a record
//! also brings the element itself up to date.

use crate::{
    entities::{Element, MaintenanceRecord, StringList, TechnicalData, element, maintenance_record},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Body of a maintenance submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceRecord {
    /// Client-assigned id; generated when absent
    pub id: Option<String>,
    pub element_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub turn: String,
    #[serde(default)]
    pub agents: Vec<String>,
    /// Untagged technical payload; `null` snapshots the element as stored
    #[serde(default)]
    pub data_snapshot: serde_json::Value,
}

/// Records a maintenance inspection.
///
/// In one transaction the record is inserted and the element's
/// `last_maintenance_date` and technical data are set from the submission.
/// The element must exist.
#[instrument(skip(db, new), fields(element_id = %new.element_id, date = %new.date))]
pub async fn add_maintenance(
    db: &DatabaseConnection,
    new: NewMaintenanceRecord,
) -> Result<maintenance_record::Model> {
    let element_id = super::require("elementId", &new.element_id)?;
    let id = match new.id {
        Some(id) => super::require("id", &id)?,
        None => super::new_id(),
    };

    let txn = db.begin().await?;

    let element = Element::find_by_id(element_id.as_str())
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ElementNotFound {
            id: element_id.clone(),
        })?;

    let snapshot = if new.data_snapshot.is_null() {
        element.data.clone()
    } else {
        TechnicalData::from_payload(element.installation_type, new.data_snapshot)?
    };

    let record = maintenance_record::ActiveModel {
        id: Set(id),
        element_id: Set(element_id),
        date: Set(new.date),
        turn: Set(new.turn),
        agents: Set(StringList(new.agents)),
        data_snapshot: Set(snapshot.clone()),
    };
    let saved = record.insert(&txn).await?;

    let mut active_element: element::ActiveModel = element.into();
    active_element.last_maintenance_date = Set(Some(new.date));
    active_element.data = Set(snapshot);
    active_element.update(&txn).await?;

    txn.commit().await?;

    info!(record_id = %saved.id, "Maintenance recorded");
    Ok(saved)
}

/// Maintenance records of an element, newest first, then by id descending.
pub async fn maintenance_history(
    db: &DatabaseConnection,
    element_id: &str,
) -> Result<Vec<maintenance_record::Model>> {
    MaintenanceRecord::find()
        .filter(maintenance_record::Column::ElementId.eq(element_id))
        .order_by_desc(maintenance_record::Column::Date)
        .order_by_desc(maintenance_record::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a maintenance record. The element is left untouched.
pub async fn delete_maintenance(db: &DatabaseConnection, record_id: &str) -> Result<()> {
    let result = MaintenanceRecord::delete_by_id(record_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "maintenance record",
            id: record_id.to_string(),
        });
    }
    Ok(())
}
