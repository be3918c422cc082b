// lib/crates/gantry-common/src/agent.rs

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Administrative enable/disable/pending-approval status, set by an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentConfigState {
    Pending,
    Enabled,
    Disabled,
}

/// Live operational status reported by the agent's last heartbeat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRunState {
    #[default]
    Unknown,
    Idle,
    Building,
    Cancelled,
    LostContact,
    Missing,
}

/// Whether the agent is currently running a job, and whether that job was
/// cancelled out from under it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildState {
    #[default]
    Unknown,
    Idle,
    Building,
    Cancelled,
}

/// Free disk space in the agent's sandbox, as reported by the last heartbeat.
///
/// The server sends either a byte count or the string `"unknown"` for agents
/// that have never reported. Unknown compares greater than every byte count,
/// so it sorts last in ascending order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FreeSpace {
    Bytes(u64),
    Unknown(String),
}

impl Default for FreeSpace {
    fn default() -> Self {
        Self::Unknown("unknown".to_string())
    }
}

impl FreeSpace {
    #[must_use]
    pub const fn bytes(&self) -> Option<u64> {
        match self {
            Self::Bytes(n) => Some(*n),
            Self::Unknown(_) => None,
        }
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Human-readable form, e.g. `5.5 GB` or `Unknown`.
    #[must_use]
    pub fn readable(&self) -> String {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let Some(bytes) = self.bytes() else {
            return "Unknown".to_string();
        };
        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        let rounded = (value * 10.0).round() / 10.0;
        if (rounded - rounded.trunc()).abs() < f64::EPSILON {
            format!("{} {}", rounded.trunc() as u64, UNITS[unit])
        } else {
            format!("{rounded:.1} {}", UNITS[unit])
        }
    }
}

impl PartialEq for FreeSpace {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FreeSpace {}

impl PartialOrd for FreeSpace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FreeSpace {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Bytes(_), Self::Unknown(_)) => Ordering::Less,
            (Self::Unknown(_), Self::Bytes(_)) => Ordering::Greater,
            (Self::Unknown(_), Self::Unknown(_)) => Ordering::Equal,
        }
    }
}

impl fmt::Display for FreeSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(n) => write!(f, "{n}"),
            Self::Unknown(_) => write!(f, "Unknown"),
        }
    }
}

/// Where an environment membership was configured (main config, config repo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentOrigin {
    #[serde(rename = "type")]
    pub kind: String,
}

/// An environment the agent belongs to, tagged with its configuration origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEnvironment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<EnvironmentOrigin>,
}

/// Pipeline/stage/job the agent is currently building, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDetails {
    pub pipeline_name: String,
    pub stage_name: String,
    pub job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
}

/// One build agent as reported by the fleet status endpoint.
///
/// `uuid` is the only field trusted for identity across snapshots; everything
/// else may change between polls (an agent transitions Idle → Building, an
/// operator disables it, disk fills up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    pub agent_config_state: AgentConfigState,
    #[serde(default)]
    pub agent_state: AgentRunState,
    #[serde(default)]
    pub build_state: BuildState,
    #[serde(default)]
    pub free_space: FreeSpace,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub environments: Vec<AgentEnvironment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_details: Option<BuildDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_plugin_id: Option<String>,
}

/// Composite of config state and run state, ranked for operator attention.
///
/// The variant order is the sort order: abnormal and in-flight conditions
/// first, idle last, disabled agents after all enabled ones except that a
/// disabled agent still running a job outranks a disabled idle one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgentStatus {
    Pending,
    LostContact,
    Missing,
    Building,
    BuildingCancelled,
    Idle,
    DisabledBuilding,
    DisabledBuildingCancelled,
    Disabled,
    Unknown,
}

impl AgentStatus {
    /// Display label, e.g. `Building (Cancelled)`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::LostContact => "LostContact",
            Self::Missing => "Missing",
            Self::Building => "Building",
            Self::BuildingCancelled => "Building (Cancelled)",
            Self::Idle => "Idle",
            Self::DisabledBuilding => "Disabled (Building)",
            Self::DisabledBuildingCancelled => "Disabled (Cancelled)",
            Self::Disabled => "Disabled",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Agent {
    /// Composite status derived from config state, run state, and build state.
    #[must_use]
    pub const fn status(&self) -> AgentStatus {
        match self.agent_config_state {
            AgentConfigState::Pending => AgentStatus::Pending,
            AgentConfigState::Disabled => match self.build_state {
                BuildState::Building => AgentStatus::DisabledBuilding,
                BuildState::Cancelled => AgentStatus::DisabledBuildingCancelled,
                BuildState::Idle | BuildState::Unknown => AgentStatus::Disabled,
            },
            AgentConfigState::Enabled => match self.agent_state {
                AgentRunState::Building => match self.build_state {
                    BuildState::Cancelled => AgentStatus::BuildingCancelled,
                    _ => AgentStatus::Building,
                },
                AgentRunState::Cancelled => AgentStatus::BuildingCancelled,
                AgentRunState::LostContact => AgentStatus::LostContact,
                AgentRunState::Missing => AgentStatus::Missing,
                AgentRunState::Idle => AgentStatus::Idle,
                AgentRunState::Unknown => AgentStatus::Unknown,
            },
        }
    }

    /// True for agents provisioned on demand by an elastic agent plugin.
    #[must_use]
    pub const fn is_elastic(&self) -> bool {
        self.elastic_agent_id.is_some() && self.elastic_plugin_id.is_some()
    }

    #[must_use]
    pub fn is_building(&self) -> bool {
        matches!(self.build_state, BuildState::Building | BuildState::Cancelled)
    }

    /// Environment names in configuration order.
    #[must_use]
    pub fn environment_names(&self) -> Vec<&str> {
        self.environments.iter().map(|e| e.name.as_str()).collect()
    }

    /// Resource tags joined for rendering, e.g. `firefox, chrome`.
    #[must_use]
    pub fn resources_label(&self) -> String {
        self.resources.join(", ")
    }

    /// Environment names joined for rendering.
    #[must_use]
    pub fn environments_label(&self) -> String {
        self.environment_names().join(", ")
    }

    /// Human-readable free space, e.g. `5.5 GB`.
    #[must_use]
    pub fn readable_free_space(&self) -> String {
        self.free_space.readable()
    }
}
