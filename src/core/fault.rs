//! Fault log business logic.

use crate::{
    entities::{FaultRecord, FaultTimes, StringList, fault_record},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Body of a fault report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFaultRecord {
    /// Client-assigned id; generated when absent
    pub id: Option<String>,
    /// Element the fault was found on
    pub element_id: String,
    /// Day the fault was attended
    pub date: NaiveDate,
    /// Station name as written on the sheet
    #[serde(default)]
    pub station_name: String,
    /// Agents who attended the fault
    #[serde(default)]
    pub agents: Vec<String>,
    /// What failed; must not be empty
    pub description: String,
    /// Notification, arrival and repair times
    #[serde(default)]
    pub times: FaultTimes,
    /// Diagnosed causes
    #[serde(default)]
    pub causes: String,
    /// Work done to restore service
    #[serde(default)]
    pub repair: String,
}

/// Records a fault. The description is required; the element is not checked
/// so incidents on uncatalogued equipment can still be logged.
#[instrument(skip(db, new), fields(element_id = %new.element_id))]
pub async fn add_fault(db: &DatabaseConnection, new: NewFaultRecord) -> Result<fault_record::Model> {
    let element_id = super::require("elementId", &new.element_id)?;
    let description = super::require("description", &new.description)?;
    let id = match new.id {
        Some(id) => super::require("id", &id)?,
        None => super::new_id(),
    };

    let record = fault_record::ActiveModel {
        id: Set(id),
        element_id: Set(element_id),
        date: Set(new.date),
        station_name: Set(new.station_name),
        agents: Set(StringList(new.agents)),
        description: Set(description),
        times: Set(new.times),
        causes: Set(new.causes),
        repair: Set(new.repair),
    };

    let saved = record.insert(db).await?;
    info!(record_id = %saved.id, "Fault recorded");
    Ok(saved)
}

/// Fault records of an element, newest first. Records of the same day are
/// ordered by id, which follows creation order for generated ids.
pub async fn fault_history(
    db: &DatabaseConnection,
    element_id: &str,
) -> Result<Vec<fault_record::Model>> {
    FaultRecord::find()
        .filter(fault_record::Column::ElementId.eq(element_id))
        .order_by_desc(fault_record::Column::Date)
        .order_by_desc(fault_record::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a fault record, failing with `NotFound` when it does not exist.
pub async fn delete_fault(db: &DatabaseConnection, record_id: &str) -> Result<()> {
    let result = FaultRecord::delete_by_id(record_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "fault record",
            id: record_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    fn fault(element_id: &str, date: &str, description: &str) -> NewFaultRecord {
        NewFaultRecord {
            id: None,
            element_id: element_id.to_string(),
            date: date.parse().unwrap(),
            station_name: "DOS HERMANAS".to_string(),
            agents: vec!["GARCIA".to_string(), "LOPEZ".to_string()],
            description: description.to_string(),
            times: FaultTimes {
                inicio: "07:45".to_string(),
                en_servicio: "09:10".to_string(),
                ..Default::default()
            },
            causes: String::new(),
            repair: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_fault_requires_description() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_fault(&db, fault("e1", "2024-02-01", "  ")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_fault_history_and_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let older = add_fault(&db, fault("e1", "2024-02-01", "Ocupación indebida")).await?;
        add_fault(&db, fault("e1", "2024-04-11", "Fallo de foco")).await?;
        add_fault(&db, fault("e2", "2024-04-12", "Otro elemento")).await?;

        let history = fault_history(&db, "e1").await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].description, "Fallo de foco");
        assert_eq!(history[1].times.inicio, "07:45");
        assert_eq!(history[1].times.en_servicio, "09:10");

        delete_fault(&db, &older.id).await?;
        assert_eq!(fault_history(&db, "e1").await?.len(), 1);
        assert!(matches!(
            delete_fault(&db, &older.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_same_day_faults_ordered_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        for (id, description) in [("f-1", "Primera"), ("f-3", "Tercera"), ("f-2", "Segunda")] {
            let mut record = fault("e1", "2024-04-11", description);
            record.id = Some(id.to_string());
            add_fault(&db, record).await?;
        }

        let history = fault_history(&db, "e1").await?;
        let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["f-3", "f-2", "f-1"]);
        Ok(())
    }
}
