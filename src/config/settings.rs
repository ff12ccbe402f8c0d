//! Process settings loaded from environment variables.
//!
//! Values may come from the real environment or from a `.env` file loaded by
//! `dotenvy` in `main`. Every setting has a default suitable for local use.

use crate::errors::{Error, Result};
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "sqlite://trackside.sqlite?mode=rwc";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_CATALOG_PATH: &str = "config.toml";

/// Settings needed to start the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `SeaORM` connection string
    pub database_url: String,
    /// Address the HTTP server listens on
    pub bind_address: SocketAddr,
    /// Path of the TOML catalog used for seeding
    pub catalog_path: String,
}

impl Settings {
    /// Reads `DATABASE_URL`, `BIND_ADDRESS` and `CATALOG_PATH`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `BIND_ADDRESS` is not a socket address.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind.parse().map_err(|e| Error::Config {
            message: format!("BIND_ADDRESS {bind:?} is not a socket address: {e}"),
        })?;

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_address,
            catalog_path: lookup("CATALOG_PATH")
                .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() -> Result<()> {
        let settings = Settings::from_lookup(|_| None)?;
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_address.port(), 3000);
        assert_eq!(settings.catalog_path, "config.toml");
        Ok(())
    }

    #[test]
    fn test_values_from_lookup() -> Result<()> {
        let vars = HashMap::from([
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
        ]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(ToString::to_string))?;
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.bind_address.port(), 8080);
        Ok(())
    }

    #[test]
    fn test_invalid_bind_address() {
        let result = Settings::from_lookup(|key| {
            (key == "BIND_ADDRESS").then(|| "not-an-address".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
