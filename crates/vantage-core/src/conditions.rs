//! External conditions: the per-tick truth the simulation derives status
//! from.
//!
//! The only writers are queued commands, drained at a tick boundary, so
//! every tick reads one stable snapshot. Route health here is the single
//! source of truth for ground blockage.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::route::RouteTable;

/// Snapshot of everything outside the entity population that status
/// derivation may read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalConditions {
    /// Passability per route, indexed like the route table.
    route_health: Vec<bool>,
    /// Entities externally flagged as engaged.
    engaged: BTreeSet<u32>,
    /// Currently selected entity, if any.
    selected: Option<u32>,
}

impl ExternalConditions {
    /// Initial conditions for a route table.
    pub fn for_table(table: &RouteTable) -> Self {
        Self {
            route_health: table.initial_health().to_vec(),
            engaged: BTreeSet::new(),
            selected: None,
        }
    }

    /// Whether a route is currently passable. Out-of-table indices read as
    /// healthy; motion validates indices against the table itself.
    pub fn is_route_healthy(&self, route: usize) -> bool {
        self.route_health.get(route).copied().unwrap_or(true)
    }

    pub fn route_health(&self) -> &[bool] {
        &self.route_health
    }

    /// Flip a route's passability. Returns the new state, or `None` for an
    /// unknown route index.
    pub fn toggle_route(&mut self, route: usize) -> Option<bool> {
        let slot = self.route_health.get_mut(route)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Set a route's passability outright. Returns `false` for an unknown
    /// route index.
    pub fn set_route_health(&mut self, route: usize, healthy: bool) -> bool {
        match self.route_health.get_mut(route) {
            Some(slot) => {
                *slot = healthy;
                true
            }
            None => false,
        }
    }

    pub fn is_engaged(&self, entity: u32) -> bool {
        self.engaged.contains(&entity)
    }

    pub fn set_engaged(&mut self, entity: u32, engaged: bool) {
        if engaged {
            self.engaged.insert(entity);
        } else {
            self.engaged.remove(&entity);
        }
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn set_selected(&mut self, entity: Option<u32>) {
        self.selected = entity;
    }
}
