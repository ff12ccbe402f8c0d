//! Enumerations stored as text columns.
//!
//! The string values double as the JSON wire values, which are the Spanish
//! labels used on the inspection sheets.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category of an inspectable element. Determines the technical-data schema.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum InstallationType {
    /// Track circuits
    #[sea_orm(string_value = "CIRCUITOS DE VÍA")]
    #[serde(rename = "CIRCUITOS DE VÍA")]
    TrackCircuits,
    /// Point motors
    #[sea_orm(string_value = "MOTORES")]
    #[serde(rename = "MOTORES")]
    PointMotors,
    /// Level crossings
    #[sea_orm(string_value = "PN")]
    #[serde(rename = "PN")]
    LevelCrossings,
    /// Signals and ASFA beacons
    #[sea_orm(string_value = "SEÑALES Y ASFA")]
    #[serde(rename = "SEÑALES Y ASFA")]
    Signals,
    /// Battery banks
    #[sea_orm(string_value = "BATERIAS")]
    #[serde(rename = "BATERIAS")]
    Batteries,
    /// Interlockings
    #[sea_orm(string_value = "ENCLAVAMIENTO")]
    #[serde(rename = "ENCLAVAMIENTO")]
    Interlockings,
}

/// Role string carried by every user account.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Full access, including user management
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    /// Manages lists, rosters and agents
    #[sea_orm(string_value = "SUPERVISOR")]
    Supervisor,
    /// Field agent; records maintenance and faults
    #[sea_orm(string_value = "AGENTE")]
    #[serde(rename = "AGENTE")]
    Agent,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Admin => "ADMIN",
            Self::Supervisor => "SUPERVISOR",
            Self::Agent => "AGENTE",
        })
    }
}
