//! Agent entity - a field worker who appears on rosters.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Agent database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "agents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Upper-cased full name
    pub name: String,
    /// Sector the agent currently works in, if assigned
    pub assigned_sector_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
