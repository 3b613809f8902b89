//! Loading participant configurations

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::scene::AgentConfig;

/// Read a JSON array of agent configs from `path`
pub async fn load_participants(path: impl AsRef<Path>) -> Result<Vec<AgentConfig>> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await?;
    let participants: Vec<AgentConfig> = serde_json::from_str(&json)?;
    debug!("Loaded {} participants from {}", participants.len(), path.display());
    Ok(participants)
}

/// Bare agent configs carrying only a name
pub fn participants_from_names<I, S>(names: I) -> Vec<AgentConfig>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(AgentConfig::new).collect()
}
