//! Command implementations

pub mod agents;
pub mod version;
