//! Enumeration types used throughout the picture simulation.

use serde::{Deserialize, Serialize};

/// Entity kind. Selects which motion and status rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Ground supply convoy, bound to a route and subject to blockage.
    GroundConvoy,
    /// Aerial asset (logistics drone). Route-bound but immune to ground
    /// blockage.
    AerialAsset,
    /// Tactical field unit on the normalized plane.
    TacticalUnit,
}

/// Displayed status for route-bound haulers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConvoyStatus {
    #[default]
    Normal,
    /// Recovering or running behind schedule. Holds until externally
    /// cleared.
    Delayed,
    /// Route is blocked under the convoy.
    Critical,
}

/// Displayed status for tactical units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    /// Holding position.
    #[default]
    Active,
    /// In contact, or sitting on a blocked route.
    Engaged,
    /// Repositioning.
    Moving,
}

/// Tactical unit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Infantry,
    Armor,
    /// Air-category units self-animate regardless of status and report
    /// altitude telemetry.
    Air,
    Recon,
}

/// Display affiliation of a tactical unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affiliation {
    Friendly,
    Hostile,
    #[default]
    Neutral,
}

/// Status of an entity as exposed in views. The domain depends on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "axis", content = "status")]
pub enum EntityStatus {
    /// Route-bound haulers (convoys and air assets).
    Hauling(ConvoyStatus),
    /// Tactical units.
    Unit(UnitStatus),
}
