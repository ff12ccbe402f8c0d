//! Maintenance record entity - one inspection of one element.
//!
//! Records are immutable once written; they can only be deleted.

use super::technical_data::TechnicalData;
use super::types::StringList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maintenance record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "maintenance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Element that was inspected
    pub element_id: String,
    /// Day the inspection took place
    pub date: Date,
    /// Shift the inspection was done on ("Mañana", "Tarde", "Noche")
    pub turn: String,
    /// Agents who carried out the work
    #[sea_orm(column_type = "Json")]
    pub agents: StringList,
    /// Element technical data as recorded at inspection time
    #[sea_orm(column_type = "Json")]
    pub data_snapshot: TechnicalData,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
