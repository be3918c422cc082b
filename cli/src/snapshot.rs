//! Snapshot document loading.
//!
//! Stands in for the polling collaborator: reads one fleet snapshot from a
//! file or stdin and decodes it. The view-model itself never does I/O.

use anyhow::{Context, Result};
use gantry_common::{Agent, parse_snapshot};

/// Source name that selects stdin.
pub const STDIN_SOURCE: &str = "-";

/// Load a snapshot document from `source` (`-` means stdin).
///
/// # Errors
///
/// Returns an error if the source cannot be read or the document does not
/// decode as an agent snapshot.
pub fn load(source: &str) -> Result<Vec<Agent>> {
    let text = if source == STDIN_SOURCE {
        std::io::read_to_string(std::io::stdin()).context("reading snapshot from stdin")?
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("reading snapshot file {source}"))?
    };
    let agents =
        parse_snapshot(&text).with_context(|| format!("parsing snapshot document from {source}"))?;
    Ok(agents)
}
