//! Element business logic - Handles all element-related operations.
//!
//! Provides functions for creating, retrieving, updating and deleting
//! elements, plus the dedicated completion toggle. Technical-data payloads
//! arrive untagged and are parsed against the element's installation type.

use crate::{
    entities::{Element, InstallationType, TechnicalData, element},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Fields accepted when creating an element.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    /// Client-assigned id; generated when absent
    pub id: Option<String>,
    pub station_id: String,
    pub installation_type: InstallationType,
    pub name: String,
    #[serde(default)]
    pub is_completed: bool,
    pub last_maintenance_date: Option<NaiveDate>,
    /// Untagged technical payload for `installation_type`
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Partial update merged into an existing element. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    pub station_id: Option<String>,
    /// Accepted only when equal to the stored type
    pub installation_type: Option<InstallationType>,
    pub name: Option<String>,
    pub is_completed: Option<bool>,
    pub last_maintenance_date: Option<NaiveDate>,
    /// Replaces the whole technical payload
    pub data: Option<serde_json::Value>,
}

/// Lists elements, optionally narrowed to a station and/or installation type,
/// ordered by name.
pub async fn list_elements(
    db: &DatabaseConnection,
    station_id: Option<&str>,
    kind: Option<InstallationType>,
) -> Result<Vec<element::Model>> {
    let mut query = Element::find();
    if let Some(station_id) = station_id {
        query = query.filter(element::Column::StationId.eq(station_id));
    }
    if let Some(kind) = kind {
        query = query.filter(element::Column::InstallationType.eq(kind));
    }
    query
        .order_by_asc(element::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an element by its id.
pub async fn get_element_by_id(
    db: &DatabaseConnection,
    element_id: &str,
) -> Result<Option<element::Model>> {
    Element::find_by_id(element_id)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_element<C>(db: &C, element_id: &str) -> Result<element::Model>
where
    C: ConnectionTrait,
{
    Element::find_by_id(element_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ElementNotFound {
            id: element_id.to_string(),
        })
}

/// Number of elements of each installation type installed at a station.
pub async fn count_elements_by_type(
    db: &DatabaseConnection,
    station_id: &str,
) -> Result<BTreeMap<InstallationType, u64>> {
    let kinds: Vec<InstallationType> = Element::find()
        .select_only()
        .column(element::Column::InstallationType)
        .filter(element::Column::StationId.eq(station_id))
        .into_tuple()
        .all(db)
        .await?;

    let mut counts = BTreeMap::new();
    for kind in kinds {
        *counts.entry(kind).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Creates an element, performing required-field validation.
///
/// The name is trimmed and upper-cased. Creating an element with an id that
/// is already taken is rejected.
#[instrument(skip(db, new), fields(station_id = %new.station_id))]
pub async fn create_element(db: &DatabaseConnection, new: NewElement) -> Result<element::Model> {
    let station_id = super::require("stationId", &new.station_id)?;
    let name = super::require("name", &new.name)?.to_uppercase();
    let data = TechnicalData::from_payload(new.installation_type, new.data)?;

    let id = match new.id {
        Some(id) => super::require("id", &id)?,
        None => super::new_id(),
    };
    if get_element_by_id(db, &id).await?.is_some() {
        return Err(Error::validation(format!("element id {id} already exists")));
    }

    let element = element::ActiveModel {
        id: Set(id),
        station_id: Set(station_id),
        installation_type: Set(new.installation_type),
        name: Set(name),
        is_completed: Set(new.is_completed),
        last_maintenance_date: Set(new.last_maintenance_date),
        data: Set(data),
    };

    let created = element.insert(db).await?;
    info!(element_id = %created.id, "Element created");
    Ok(created)
}

/// Merges `patch` into the stored element.
///
/// The installation type cannot change: a patch naming a different type is a
/// validation error. A `data` payload is parsed against the stored type and
/// replaces the previous technical data entirely.
#[instrument(skip(db, patch))]
pub async fn update_element(
    db: &DatabaseConnection,
    element_id: &str,
    patch: ElementPatch,
) -> Result<element::Model> {
    let existing = require_element(db, element_id).await?;

    if let Some(kind) = patch.installation_type
        && kind != existing.installation_type
    {
        return Err(Error::validation(
            "installationType cannot be changed after creation",
        ));
    }

    let kind = existing.installation_type;
    let mut active_model: element::ActiveModel = existing.into();

    if let Some(station_id) = patch.station_id {
        active_model.station_id = Set(super::require("stationId", &station_id)?);
    }
    if let Some(name) = patch.name {
        active_model.name = Set(super::require("name", &name)?.to_uppercase());
    }
    if let Some(is_completed) = patch.is_completed {
        active_model.is_completed = Set(is_completed);
    }
    if let Some(date) = patch.last_maintenance_date {
        active_model.last_maintenance_date = Set(Some(date));
    }
    if let Some(payload) = patch.data {
        active_model.data = Set(TechnicalData::from_payload(kind, payload)?);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Sets the completion flag of an element to an explicit value.
pub async fn set_completion(
    db: &DatabaseConnection,
    element_id: &str,
    completed: bool,
) -> Result<element::Model> {
    let existing = require_element(db, element_id).await?;
    let mut active_model: element::ActiveModel = existing.into();
    active_model.is_completed = Set(completed);
    active_model.update(db).await.map_err(Into::into)
}

/// Flips the completion flag of an element and returns the updated element.
#[instrument(skip(db))]
pub async fn toggle_completion(
    db: &DatabaseConnection,
    element_id: &str,
) -> Result<element::Model> {
    let existing = require_element(db, element_id).await?;
    let completed = !existing.is_completed;
    let mut active_model: element::ActiveModel = existing.into();
    active_model.is_completed = Set(completed);
    let updated = active_model.update(db).await?;
    info!(completed, "Element completion toggled");
    Ok(updated)
}

/// Deletes an element. Records and list items that reference it are kept.
#[instrument(skip(db))]
pub async fn delete_element(db: &DatabaseConnection, element_id: &str) -> Result<()> {
    let result = Element::delete_by_id(element_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ElementNotFound {
            id: element_id.to_string(),
        });
    }
    info!("Element deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::technical_data::LevelCrossingData;
    use crate::test_utils::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_element_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let mut new = new_element("e1", InstallationType::Signals);
        new.name = "   ".to_string();
        let result = create_element(&db, new).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let mut new = new_element("e1", InstallationType::Signals);
        new.station_id = String::new();
        let result = create_element(&db, new).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_element_uppercases_and_parses_payload() -> Result<()> {
        let db = setup_test_db().await?;

        let mut new = new_element("pn-1", InstallationType::LevelCrossings);
        new.name = " pn la salud ".to_string();
        new.data = json!({ "pk": "12.300", "contrata": "Simpe SA" });
        let created = create_element(&db, new).await?;

        assert_eq!(created.name, "PN LA SALUD");
        assert!(!created.is_completed);
        assert_eq!(
            created.data,
            TechnicalData::LevelCrossing(LevelCrossingData {
                pk: Some("12.300".to_string()),
                last_agents: None,
                contractor: Some("Simpe SA".to_string()),
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_element_generates_id_when_missing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new = new_element("ignored", InstallationType::Batteries);
        new.id = None;
        let created = create_element(&db, new).await?;
        assert!(!created.id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_element_rejects_duplicate_id() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "dup", InstallationType::Batteries).await?;
        let result = create_element(&db, new_element("dup", InstallationType::Batteries)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_element_merges_fields() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::TrackCircuits).await?;

        let patch = ElementPatch {
            name: Some("cv 2".to_string()),
            data: Some(json!({ "frecuencia": "9.5 kHz" })),
            ..Default::default()
        };
        let updated = update_element(&db, "e1", patch).await?;

        assert_eq!(updated.name, "CV 2");
        assert_eq!(updated.station_id, "dos-hermanas");
        let TechnicalData::TrackCircuit(circuit) = updated.data else {
            panic!("track circuit payload expected");
        };
        assert_eq!(circuit.frequency.as_deref(), Some("9.5 kHz"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_element_rejects_type_change() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::TrackCircuits).await?;

        let same_type = ElementPatch {
            installation_type: Some(InstallationType::TrackCircuits),
            ..Default::default()
        };
        update_element(&db, "e1", same_type).await?;

        let other_type = ElementPatch {
            installation_type: Some(InstallationType::Signals),
            ..Default::default()
        };
        let result = update_element(&db, "e1", other_type).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let stored = get_element_by_id(&db, "e1").await?.unwrap();
        assert_eq!(stored.installation_type, InstallationType::TrackCircuits);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_element() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_element(&db, "nope", ElementPatch::default()).await;
        assert!(matches!(result, Err(Error::ElementNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_completion_flips_flag() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::PointMotors).await?;

        let toggled = toggle_completion(&db, "e1").await?;
        assert!(toggled.is_completed);
        let toggled = toggle_completion(&db, "e1").await?;
        assert!(!toggled.is_completed);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_count_elements() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "cv-2", InstallationType::TrackCircuits).await?;
        create_test_element(&db, "cv-1", InstallationType::TrackCircuits).await?;
        create_test_element(&db, "mot-1", InstallationType::PointMotors).await?;
        create_custom_element(&db, "far", "utrera-est", InstallationType::PointMotors).await?;

        let circuits = list_elements(
            &db,
            Some("dos-hermanas"),
            Some(InstallationType::TrackCircuits),
        )
        .await?;
        let names: Vec<_> = circuits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["CV-1", "CV-2"]);

        assert_eq!(list_elements(&db, None, None).await?.len(), 4);

        let counts = count_elements_by_type(&db, "dos-hermanas").await?;
        assert_eq!(counts.get(&InstallationType::TrackCircuits), Some(&2));
        assert_eq!(counts.get(&InstallationType::PointMotors), Some(&1));
        assert_eq!(counts.get(&InstallationType::Signals), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_element() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_element(&db, "e1", InstallationType::Batteries).await?;

        delete_element(&db, "e1").await?;
        assert!(get_element_by_id(&db, "e1").await?.is_none());

        let again = delete_element(&db, "e1").await;
        assert!(matches!(again, Err(Error::ElementNotFound { .. })));
        Ok(())
    }
}
