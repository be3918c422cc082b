pub mod agent;
pub mod snapshot;

pub use agent::{
    Agent, AgentConfigState, AgentEnvironment, AgentRunState, AgentStatus, BuildDetails,
    BuildState, EnvironmentOrigin, FreeSpace,
};
pub use snapshot::{SnapshotError, parse_snapshot};
