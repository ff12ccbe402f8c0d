/// Database connection and table creation
pub mod database;

/// Sector/station catalog and bootstrap admin loaded from config.toml
pub mod catalog;

/// Process settings read from environment variables
pub mod settings;
