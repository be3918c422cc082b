//! Fleet view-model: the in-memory model of the known agent set.
//!
//! Owns the latest snapshot, the free-text filter, and the multi-select set.
//! A polling collaborator replaces the snapshot wholesale via [`Fleet::sync`];
//! selection survives only for agents still present. All operations are
//! synchronous over owned state — callers needing cross-thread access wrap
//! the whole model in their own mutex or actor.

use gantry_common::{Agent, AgentConfigState};

/// The current known set of build agents plus view bookkeeping.
#[derive(Debug, Default)]
pub struct Fleet {
    snapshot: Vec<Agent>,
    /// Selected agent uuids in selection order. A `Vec` rather than a hash
    /// set: bulk operations want insertion order, and fleets are small.
    selected: Vec<String>,
    filter_text: Option<String>,
}

impl Fleet {
    /// An empty fleet; populate with [`Fleet::sync`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a fresh one from the server.
    ///
    /// Selection is reconciled by uuid: agents absent from the new snapshot
    /// are silently dropped from the selection, agents present in both stay
    /// selected, and newly appeared agents are never auto-selected. Calling
    /// twice with the same snapshot changes nothing after the first call.
    pub fn sync(&mut self, snapshot: Vec<Agent>) {
        self.snapshot = snapshot;
        self.selected
            .retain(|uuid| self.snapshot.iter().any(|agent| agent.uuid == *uuid));
    }

    /// Number of agents in the raw snapshot, ignoring the filter.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.snapshot.len()
    }

    /// The active filter text, if any.
    #[must_use]
    pub fn filter_text(&self) -> Option<&str> {
        self.filter_text.as_deref()
    }

    /// Set or clear the free-text filter. Whitespace-only text clears it.
    pub fn set_filter_text(&mut self, text: Option<&str>) {
        self.filter_text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string);
    }

    /// The snapshot restricted by the filter, in snapshot order.
    ///
    /// Sorting is the rendering layer's job, driven by its sort handlers.
    #[must_use]
    pub fn list(&self) -> Vec<&Agent> {
        let Some(filter) = self.filter_text.as_deref() else {
            return self.snapshot.iter().collect();
        };
        let needle = filter.to_lowercase();
        self.snapshot
            .iter()
            .filter(|agent| matches_filter(agent, &needle))
            .collect()
    }

    /// The filtered list further restricted to one administrative state.
    ///
    /// This is how the dashboard splits the fleet into its pending-approval
    /// and main views.
    #[must_use]
    pub fn filter_by(&self, state: AgentConfigState) -> Vec<&Agent> {
        let mut agents = self.list();
        agents.retain(|agent| agent.agent_config_state == state);
        agents
    }

    /// Add a uuid to the selection. Idempotent. A uuid unknown to the current
    /// snapshot is tolerated — the UI only offers checkboxes for rendered
    /// agents, so this only happens in the window between a click and the
    /// next sync, which then drops it.
    pub fn select_agent(&mut self, uuid: &str) {
        if !self.selected.iter().any(|s| s == uuid) {
            self.selected.push(uuid.to_string());
        }
    }

    /// True when the uuid is currently selected.
    #[must_use]
    pub fn is_selected(&self, uuid: &str) -> bool {
        self.selected.iter().any(|s| s == uuid)
    }

    /// Clear the selection unconditionally.
    pub fn unselect_all(&mut self) {
        self.selected.clear();
    }

    /// Select-all / select-none toggle over the unfiltered snapshot: if every
    /// agent is already selected, clear the selection; otherwise select every
    /// agent (a partial selection becomes all-selected, not all-unselected).
    pub fn toggle_agents_selection(&mut self) {
        let all_selected = self
            .snapshot
            .iter()
            .all(|agent| self.is_selected(&agent.uuid));
        if all_selected {
            self.selected.clear();
        } else {
            let missing: Vec<String> = self
                .snapshot
                .iter()
                .filter(|agent| !self.is_selected(&agent.uuid))
                .map(|agent| agent.uuid.clone())
                .collect();
            self.selected.extend(missing);
        }
    }

    /// True iff the selection is exactly the set of static agent uuids.
    ///
    /// Elastic agents are excluded: bulk enable/disable/delete applies only
    /// to statically registered agents.
    #[must_use]
    pub fn is_all_static_agents_selected(&self) -> bool {
        let static_uuids: Vec<&str> = self
            .snapshot
            .iter()
            .filter(|agent| !agent.is_elastic())
            .map(|agent| agent.uuid.as_str())
            .collect();
        self.selected.len() == static_uuids.len()
            && static_uuids.iter().all(|uuid| self.is_selected(uuid))
    }

    /// Selected uuids in selection order, for bulk-operation API calls.
    #[must_use]
    pub fn selected_agent_uuids(&self) -> &[String] {
        &self.selected
    }
}

/// OR-match across every examined field: an agent matches when at least one
/// field's lowercase string form contains the lowercase needle. Absent fields
/// are skipped, never a mismatch on their own.
fn matches_filter(agent: &Agent, needle: &str) -> bool {
    let optional_fields = [
        agent.hostname.as_deref(),
        agent.operating_system.as_deref(),
        agent.sandbox.as_deref(),
        agent.ip_address.as_deref(),
    ];
    if optional_fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    {
        return true;
    }
    [
        agent.free_space.to_string(),
        agent.status().to_string(),
        agent.resources_label(),
        agent.environments_label(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
