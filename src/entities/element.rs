//! Element entity - a single inspectable infrastructure item.
//!
//! Each element belongs to one station and one installation type, carries
//! typed technical data and a completion flag that the semester reset clears.

use super::sea_orm_active_enums::InstallationType;
use super::technical_data::TechnicalData;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Element database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "elements")]
pub struct Model {
    /// Opaque id assigned when the element is created
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Station the element is installed at
    pub station_id: String,
    /// Category; never changes after creation
    pub installation_type: InstallationType,
    /// Display name, stored upper-cased (e.g. "CV 1")
    pub name: String,
    /// Inspected during the current semester
    pub is_completed: bool,
    /// Date of the most recent maintenance record
    pub last_maintenance_date: Option<Date>,
    /// Technical readings, schema chosen by `installation_type`
    #[sea_orm(column_type = "Json")]
    pub data: TechnicalData,
}

/// Records and list items reference elements by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
