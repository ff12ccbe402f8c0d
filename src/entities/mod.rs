//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables. Each entity has a Model
//! struct for data and an Entity struct for operations. Cross-references
//! between tables are plain id columns; no foreign keys are declared.

pub mod agent;
pub mod element;
pub mod fault_record;
pub mod maintenance_record;
pub mod monthly_list;
pub mod roster;
pub mod sea_orm_active_enums;
pub mod sector;
pub mod station;
pub mod system_state;
pub mod technical_data;
pub mod types;
pub mod user;

// Re-export specific types to avoid conflicts
pub use agent::{Column as AgentColumn, Entity as Agent, Model as AgentModel};
pub use element::{Column as ElementColumn, Entity as Element, Model as ElementModel};
pub use fault_record::{
    Column as FaultRecordColumn, Entity as FaultRecord, Model as FaultRecordModel,
};
pub use maintenance_record::{
    Column as MaintenanceRecordColumn, Entity as MaintenanceRecord,
    Model as MaintenanceRecordModel,
};
pub use monthly_list::{
    Column as MonthlyListColumn, Entity as MonthlyList, Model as MonthlyListModel,
};
pub use roster::{Column as RosterColumn, Entity as Roster, Model as RosterModel};
pub use sea_orm_active_enums::{InstallationType, UserRole};
pub use sector::{Column as SectorColumn, Entity as Sector, Model as SectorModel};
pub use station::{Column as StationColumn, Entity as Station, Model as StationModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
pub use technical_data::TechnicalData;
pub use types::{FaultTimes, ListItem, ListItems, ShiftGrid, StringList};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
