//! Catalog configuration loading from config.toml
//!
//! The sector/station catalog and the bootstrap admin account are defined in a
//! TOML file and seeded into the database at startup (see
//! `core::catalog::seed_catalog`).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Account created on first start so that someone can approve others
    pub admin: Option<AdminConfig>,
    /// Maintenance sectors
    #[serde(default)]
    pub sectors: Vec<SectorConfig>,
}

/// Bootstrap administrator
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Employee number of the admin
    pub matricula: String,
    /// Display name
    pub full_name: String,
}

/// One sector and its stations
#[derive(Debug, Deserialize, Clone)]
pub struct SectorConfig {
    /// Stable id (e.g. "utrera")
    pub id: String,
    /// Display name
    pub name: String,
    /// Stations belonging to this sector
    #[serde(default)]
    pub stations: Vec<StationConfig>,
}

/// One station
#[derive(Debug, Deserialize, Clone)]
pub struct StationConfig {
    /// Stable id (e.g. "utrera-est")
    pub id: String,
    /// Display name
    pub name: String,
}

/// Loads the catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading catalog from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {path_ref:?}: {e}"),
    })?;

    parse_catalog(&contents)
}

/// Parses catalog TOML text.
pub fn parse_catalog(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let toml_str = r#"
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
        "#;

        let catalog = parse_catalog(toml_str).unwrap();
        assert_eq!(catalog.admin.unwrap().matricula, "srchicano");
        assert_eq!(catalog.sectors.len(), 2);
        assert_eq!(catalog.sectors[0].stations.len(), 2);
        assert_eq!(catalog.sectors[0].stations[1].id, "arahal");
        assert!(catalog.sectors[1].stations.is_empty());
    }

    #[test]
    fn test_parse_catalog_rejects_missing_name() {
        let result = parse_catalog("[[sectors]]\nid = \"x\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
