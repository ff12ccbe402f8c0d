//! Fault record entity - an incident attended on an element.

use super::types::{FaultTimes, StringList};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fault record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "fault_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub element_id: String,
    pub date: Date,
    /// Station name as shown on the incident sheet
    pub station_name: String,
    #[sea_orm(column_type = "Json")]
    pub agents: StringList,
    pub description: String,
    /// Timeline of the intervention
    #[sea_orm(column_type = "Json")]
    pub times: FaultTimes,
    pub causes: String,
    pub repair: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
