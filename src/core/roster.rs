//! Monthly shift rosters per sector.
//!
//! A roster maps each agent to the shift code worked on each day of the month
//! ("M", "T", "N", "G", "VB", ...). An empty code means no shift.

use crate::{
    entities::{Roster, ShiftGrid, roster},
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// agent id -> shift code -> days worked with that code
pub type ShiftStats = BTreeMap<String, BTreeMap<String, u32>>;

/// Body of a roster save.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterInput {
    pub id: Option<String>,
    pub sector_id: String,
    pub month: i32,
    pub year: i32,
    #[serde(default)]
    pub data: ShiftGrid,
}

async fn find_roster<C>(db: &C, sector_id: &str, month: i32, year: i32) -> Result<Option<roster::Model>>
where
    C: ConnectionTrait,
{
    Roster::find()
        .filter(roster::Column::SectorId.eq(sector_id))
        .filter(roster::Column::Month.eq(month))
        .filter(roster::Column::Year.eq(year))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Roster of a sector for one month, or `None` when none was saved.
pub async fn get_roster(
    db: &DatabaseConnection,
    sector_id: &str,
    month: i32,
    year: i32,
) -> Result<Option<roster::Model>> {
    super::validate_month(month)?;
    find_roster(db, sector_id, month, year).await
}

/// Saves the roster of `(sector, month, year)`, overwriting the whole grid of
/// any roster already stored for that period. The stored id is kept; a client
/// id used by a roster of another period is replaced by a new one.
#[instrument(skip(db, input), fields(sector_id = %input.sector_id, month = input.month, year = input.year))]
pub async fn save_roster(db: &DatabaseConnection, input: RosterInput) -> Result<roster::Model> {
    super::validate_month(input.month)?;
    let sector_id = super::require("sectorId", &input.sector_id)?;

    let txn = db.begin().await?;

    let saved = match find_roster(&txn, &sector_id, input.month, input.year).await? {
        Some(existing) => {
            let mut active_model: roster::ActiveModel = existing.into();
            active_model.data = Set(input.data);
            active_model.update(&txn).await?
        }
        None => {
            let id = match input.id {
                Some(id) => {
                    let id = super::require("id", &id)?;
                    // Taken by a roster of another sector or period
                    if Roster::find_by_id(id.as_str()).one(&txn).await?.is_some() {
                        warn!(requested_id = %id, "Roster id already in use, assigning a new one");
                        super::new_id()
                    } else {
                        id
                    }
                }
                None => super::new_id(),
            };
            roster::ActiveModel {
                id: Set(id),
                sector_id: Set(sector_id),
                month: Set(input.month),
                year: Set(input.year),
                data: Set(input.data),
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;

    info!(agents = saved.data.0.len(), "Roster saved");
    Ok(saved)
}

/// Counts the shifts each agent worked in a sector over a year.
///
/// Every agent present on any roster of that year has an entry, possibly
/// empty. Empty shift codes are not counted.
pub async fn roster_stats(db: &DatabaseConnection, sector_id: &str, year: i32) -> Result<ShiftStats> {
    let rosters = Roster::find()
        .filter(roster::Column::SectorId.eq(sector_id))
        .filter(roster::Column::Year.eq(year))
        .all(db)
        .await?;

    let mut stats = ShiftStats::new();
    for roster in rosters {
        for (agent_id, days) in roster.data.0 {
            let counts = stats.entry(agent_id).or_default();
            for code in days.into_values().filter(|code| !code.is_empty()) {
                *counts.entry(code).or_insert(0) += 1;
            }
        }
    }
    Ok(stats)
}
