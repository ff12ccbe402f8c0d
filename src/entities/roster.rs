//! Roster entity - shift grid of one sector for one month.

use super::types::ShiftGrid;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Roster database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "rosters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sector_id: String,
    pub month: i32,
    pub year: i32,
    /// agent id -> day of month -> shift code
    #[sea_orm(column_type = "Json")]
    pub data: ShiftGrid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
