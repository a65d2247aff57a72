//! ECS components for hecs entities.
//!
//! Components are plain data structs with no update logic. Motion and
//! status rules live in the simulation systems, not here.

use serde::{Deserialize, Serialize};

use crate::constants::VITALS_MAX;
use crate::enums::{Affiliation, UnitCategory};
use crate::types::wrap_heading;

/// Stable identity of a picture entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique id for the run, assigned by the engine.
    pub id: u32,
    /// Display label ("C-ALPHA", "EAGLE 1").
    pub callsign: String,
}

/// Marks an entity as a ground supply convoy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Convoy;

/// Marks an entity as an aerial asset (immune to ground route blockage).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AirAsset;

/// Marks an entity as a tactical field unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TacticalUnit {
    pub category: UnitCategory,
    pub affiliation: Affiliation,
}

/// Position along an assigned route.
///
/// `route` must always be a valid index into the route table; `progress`
/// stays in [0, 100] after every update (wrapping to 0 past the end).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathProgress {
    pub route: usize,
    pub progress: f64,
}

/// Position on the normalized 0-100 plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanePosition {
    pub x: f64,
    pub y: f64,
}

/// Reported movement telemetry for tactical units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Telemetry {
    /// Reported speed, km/h. Never negative.
    pub speed: f64,
    /// Heading in degrees, always in [0, 360).
    pub heading_deg: f64,
    /// Altitude in feet, air-category units only.
    pub altitude_ft: Option<f64>,
}

impl Telemetry {
    pub fn new(speed: f64, heading_deg: f64, altitude_ft: Option<f64>) -> Self {
        Self {
            speed: speed.max(0.0),
            heading_deg: wrap_heading(heading_deg),
            altitude_ft,
        }
    }
}

/// Bounded combat vitals for tactical units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    /// 0-100.
    pub health: u8,
    /// 0-100.
    pub ammo: u8,
}

impl Vitals {
    /// Build vitals, clamping both axes into [0, 100].
    pub fn new(health: u8, ammo: u8) -> Self {
        Self {
            health: health.min(VITALS_MAX),
            ammo: ammo.min(VITALS_MAX),
        }
    }

    /// Whether the unit is flagged visually degraded. Does not affect the
    /// status enum.
    pub fn is_degraded(&self) -> bool {
        self.health < crate::constants::HEALTH_DEGRADED_THRESHOLD
    }
}
