//! Fleet snapshot document parsing.
//!
//! The fleet status endpoint serves the agent list either as a bare JSON
//! array or wrapped in a HAL-style `{"_embedded": {"agents": [...]}}`
//! envelope. Both shapes decode to the same `Vec<Agent>`.

use serde::Deserialize;
use thiserror::Error;

use crate::agent::Agent;

/// Errors produced while decoding a snapshot document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot document: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDoc {
    Plain(Vec<Agent>),
    Embedded {
        #[serde(rename = "_embedded")]
        embedded: EmbeddedAgents,
    },
}

#[derive(Deserialize)]
struct EmbeddedAgents {
    agents: Vec<Agent>,
}

/// Decode a snapshot document into the agent list it carries.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] when the document is not valid JSON
/// or does not match either accepted shape.
pub fn parse_snapshot(json: &str) -> Result<Vec<Agent>, SnapshotError> {
    let doc: SnapshotDoc = serde_json::from_str(json)?;
    Ok(match doc {
        SnapshotDoc::Plain(agents) => agents,
        SnapshotDoc::Embedded { embedded } => embedded.agents,
    })
}
