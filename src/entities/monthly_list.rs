//! Monthly list entity - elements scheduled for inspection in one month.
//!
//! At most one list exists per `(month, year)`; saving replaces it wholesale.
//! The `completed` flag of each stored item is a cache only. Readers
//! reconcile it against the live element (see `core::monthly_list`).

use super::types::ListItems;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly list database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "monthly_lists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Calendar month, 1-12
    pub month: i32,
    pub year: i32,
    /// Ordered list items
    #[sea_orm(column_type = "Json")]
    pub items: ListItems,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
