//! Commands sent from controlling callers to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before any
//! system runs, so a tick never observes a half-applied change.

use serde::{Deserialize, Serialize};

/// All caller-driven inputs to a running picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PictureCommand {
    // --- Route health ---
    /// Flip a route between passable and blocked.
    ToggleRoute { route: usize },
    /// Set a route's passability outright.
    SetRouteHealth { route: usize, healthy: bool },

    // --- Selection ---
    /// Select an entity for detailed inspection.
    Select { entity: u32 },
    /// Clear the current selection.
    ClearSelection,

    // --- Status inputs ---
    /// Externally flag or unflag a tactical unit as engaged.
    SetEngagement { entity: u32, engaged: bool },
    /// Acknowledge recovery: return a Delayed convoy to Normal.
    ClearDelay { entity: u32 },
}
