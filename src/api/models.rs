//! Response bodies whose shape differs from the stored models.
//!
//! Technical data is stored tagged by variant but travels untagged next to
//! the element's `installationType`.

use crate::{
    core::{report::ReportRow, semester::SemesterResetResult},
    entities::{
        ElementModel, InstallationType, MaintenanceRecordModel, StringList, TechnicalData,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

fn serialize_payload<S>(data: &TechnicalData, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    data.payload().serialize(serializer)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementResponse {
    pub id: String,
    pub station_id: String,
    pub installation_type: InstallationType,
    pub name: String,
    pub is_completed: bool,
    pub last_maintenance_date: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_payload")]
    pub data: TechnicalData,
}

impl From<ElementModel> for ElementResponse {
    fn from(element: ElementModel) -> Self {
        Self {
            id: element.id,
            station_id: element.station_id,
            installation_type: element.installation_type,
            name: element.name,
            is_completed: element.is_completed,
            last_maintenance_date: element.last_maintenance_date,
            data: element.data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponse {
    pub id: String,
    pub element_id: String,
    pub date: NaiveDate,
    pub turn: String,
    pub agents: StringList,
    #[serde(serialize_with = "serialize_payload")]
    pub data_snapshot: TechnicalData,
}

impl From<MaintenanceRecordModel> for MaintenanceResponse {
    fn from(record: MaintenanceRecordModel) -> Self {
        Self {
            id: record.id,
            element_id: record.element_id,
            date: record.date,
            turn: record.turn,
            agents: record.agents,
            data_snapshot: record.data_snapshot,
        }
    }
}

/// Maintenance record joined with its element's display fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRowResponse {
    #[serde(flatten)]
    pub record: MaintenanceResponse,
    pub element_name: Option<String>,
    pub station_id: Option<String>,
}

impl From<ReportRow> for ReportRowResponse {
    fn from(row: ReportRow) -> Self {
        Self {
            record: row.record.into(),
            element_name: row.element_name,
            station_id: row.station_id,
        }
    }
}

/// Outcome of `POST /semester/reset`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResetResponse {
    /// False when the current semester was already reset
    pub performed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements_cleared: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previously_completed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
}

impl From<Option<SemesterResetResult>> for SemesterResetResponse {
    fn from(result: Option<SemesterResetResult>) -> Self {
        match result {
            Some(result) => Self {
                performed: true,
                elements_cleared: Some(result.elements_cleared),
                previously_completed: Some(result.previously_completed),
                semester_start: Some(result.semester_start),
                reset_at: Some(result.reset_at),
            },
            None => Self {
                performed: false,
                elements_cleared: None,
                previously_completed: None,
                semester_start: None,
                reset_at: None,
            },
        }
    }
}
