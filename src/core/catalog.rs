//! Sector and station catalog.
//!
//! The catalog is read-only over the API. It is seeded from `config.toml` at
//! startup; seeding upserts by id so it can run on every start.

use crate::{
    config::catalog::CatalogConfig,
    entities::{Sector, Station, sector, station},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::OnConflict};
use tracing::info;

/// All sectors, by name.
pub async fn list_sectors(db: &DatabaseConnection) -> Result<Vec<sector::Model>> {
    Sector::find()
        .order_by_asc(sector::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Stations, optionally limited to one sector, by name.
pub async fn list_stations(
    db: &DatabaseConnection,
    sector_id: Option<&str>,
) -> Result<Vec<station::Model>> {
    let mut query = Station::find();
    if let Some(sector_id) = sector_id {
        query = query.filter(station::Column::SectorId.eq(sector_id));
    }
    query
        .order_by_asc(station::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Summary of a catalog seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Sectors upserted
    pub sectors: usize,
    /// Stations upserted
    pub stations: usize,
    /// Whether the bootstrap administrator had to be created
    pub admin_created: bool,
}

/// Writes the configured sectors and stations, then ensures the bootstrap
/// administrator exists.
pub async fn seed_catalog(db: &DatabaseConnection, catalog: &CatalogConfig) -> Result<SeedSummary> {
    let txn = db.begin().await?;
    let mut station_count = 0;

    for sector_config in &catalog.sectors {
        let row = sector::ActiveModel {
            id: Set(sector_config.id.clone()),
            name: Set(sector_config.name.clone()),
        };
        Sector::insert(row)
            .on_conflict(
                OnConflict::column(sector::Column::Id)
                    .update_column(sector::Column::Name)
                    .to_owned(),
            )
            .exec(&txn)
            .await?;

        for station_config in &sector_config.stations {
            let row = station::ActiveModel {
                id: Set(station_config.id.clone()),
                name: Set(station_config.name.clone()),
                sector_id: Set(sector_config.id.clone()),
            };
            Station::insert(row)
                .on_conflict(
                    OnConflict::column(station::Column::Id)
                        .update_columns([station::Column::Name, station::Column::SectorId])
                        .to_owned(),
                )
                .exec(&txn)
                .await?;
            station_count += 1;
        }
    }

    txn.commit().await?;

    let admin_created = match &catalog.admin {
        Some(admin) => super::user::ensure_admin(db, &admin.matricula, &admin.full_name).await?,
        None => false,
    };

    let summary = SeedSummary {
        sectors: catalog.sectors.len(),
        stations: station_count,
        admin_created,
    };
    info!(
        sectors = summary.sectors,
        stations = summary.stations,
        admin_created,
        "Catalog seeded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::catalog::parse_catalog;
    use crate::test_utils::setup_test_db;

    const CATALOG: &str = r#"
        [admin]
        matricula = "srchicano"
        full_name = "SR CHICANO"

        [[sectors]]
        id = "utrera"
        name = "UTRERA"

        [[sectors.stations]]
        id = "utrera-est"
        name = "UTRERA"

        [[sectors.stations]]
        id = "arahal"
        name = "ARAHAL"

        [[sectors]]
        id = "jerez"
        name = "JEREZ"

        [[sectors.stations]]
        id = "cadiz"
        name = "CADIZ"
    "#;

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let catalog = parse_catalog(CATALOG)?;

        let first = seed_catalog(&db, &catalog).await?;
        assert_eq!(first.sectors, 2);
        assert_eq!(first.stations, 3);
        assert!(first.admin_created);

        let second = seed_catalog(&db, &catalog).await?;
        assert!(!second.admin_created);
        assert_eq!(list_sectors(&db).await?.len(), 2);
        assert_eq!(list_stations(&db, None).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_stations_by_sector() -> Result<()> {
        let db = setup_test_db().await?;
        seed_catalog(&db, &parse_catalog(CATALOG)?).await?;

        let names: Vec<_> = list_stations(&db, Some("utrera"))
            .await?
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["ARAHAL", "UTRERA"]);
        assert!(list_stations(&db, Some("nowhere")).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_renames_existing_station() -> Result<()> {
        let db = setup_test_db().await?;
        seed_catalog(&db, &parse_catalog(CATALOG)?).await?;

        let renamed = CATALOG.replace("name = \"CADIZ\"", "name = \"CÁDIZ\"");
        seed_catalog(&db, &parse_catalog(&renamed)?).await?;

        let jerez = list_stations(&db, Some("jerez")).await?;
        assert_eq!(jerez.len(), 1);
        assert_eq!(jerez[0].name, "CÁDIZ");
        Ok(())
    }
}
