//! JSON column types shared by several entities.

use super::sea_orm_active_enums::InstallationType;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plain list of strings stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

/// One entry of a monthly list.
///
/// Everything except `element_id` is denormalised for display. `completed` is
/// the value cached at save time and may be stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub element_id: String,
    #[serde(default)]
    pub station_name: String,
    pub installation_type: InstallationType,
    #[serde(default)]
    pub element_name: String,
    #[serde(default)]
    pub completed: bool,
}

/// Ordered items of a monthly list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct ListItems(pub Vec<ListItem>);

/// Roster grid: agent id -> day of month ("1".."31") -> shift code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct ShiftGrid(pub BTreeMap<String, BTreeMap<String, String>>);

/// Wall-clock times ("HH:MM") of each stage of a fault intervention.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct FaultTimes {
    /// Notification received
    pub inicio: String,
    /// Arrival on site
    pub llegada: String,
    /// Work authorisation requested
    pub sol_aut_trabajos: String,
    /// Authorisation granted
    pub concesion: String,
    /// Back in service
    pub en_servicio: String,
    /// Work finished
    pub fin_trabajos: String,
    /// Left the site
    pub salida: String,
    /// Arrived back at base
    pub llegada_dest: String,
}
