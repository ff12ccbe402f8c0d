//! Agent business logic - field workers listed on rosters.

use crate::{
    entities::{Agent, agent},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

fn not_found(agent_id: &str) -> Error {
    Error::NotFound {
        entity: "agent",
        id: agent_id.to_string(),
    }
}

/// All agents, by name.
pub async fn list_agents(db: &DatabaseConnection) -> Result<Vec<agent::Model>> {
    Agent::find()
        .order_by_asc(agent::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates an agent with an upper-cased name and a server-assigned id.
pub async fn create_agent(
    db: &DatabaseConnection,
    name: &str,
    sector_id: Option<String>,
) -> Result<agent::Model> {
    let name = super::require("name", name)?.to_uppercase();
    let agent = agent::ActiveModel {
        id: Set(super::new_id()),
        name: Set(name),
        assigned_sector_id: Set(sector_id.filter(|s| !s.trim().is_empty())),
    };
    let created = agent.insert(db).await?;
    info!(agent_id = %created.id, name = %created.name, "Agent created");
    Ok(created)
}

/// Moves an agent to a sector, or clears the assignment with `None`.
pub async fn assign_sector(
    db: &DatabaseConnection,
    agent_id: &str,
    sector_id: Option<String>,
) -> Result<agent::Model> {
    let existing = Agent::find_by_id(agent_id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(agent_id))?;
    let mut active_model: agent::ActiveModel = existing.into();
    active_model.assigned_sector_id = Set(sector_id.filter(|s| !s.trim().is_empty()));
    active_model.update(db).await.map_err(Into::into)
}

/// Deletes an agent. Rosters that mention it are left as they are.
pub async fn delete_agent(db: &DatabaseConnection, agent_id: &str) -> Result<()> {
    let result = Agent::delete_by_id(agent_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(not_found(agent_id));
    }
    Ok(())
}
