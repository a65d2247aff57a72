//! Picture snapshot: the complete visible state published to the renderer
//! each tick.
//!
//! Snapshots are plain immutable values. The renderer receives them behind
//! an `Arc` and must treat them as read-only; nothing here has interior
//! mutability.

use serde::{Deserialize, Serialize};

use crate::enums::{Affiliation, EntityKind, EntityStatus, UnitCategory};
use crate::route::Curve;
use crate::types::{MapPoint, SimTime};

/// Complete picture state for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PictureSnapshot {
    pub time: SimTime,
    /// Routes in table order with live health.
    pub routes: Vec<RouteView>,
    /// All entities, sorted by id.
    pub entities: Vec<EntityView>,
    /// Selected entity id, if any.
    pub selected: Option<u32>,
}

/// A route as drawn on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteView {
    pub id: u32,
    pub name: String,
    /// Curve definition for the renderer to draw directly.
    pub curve: Curve,
    pub healthy: bool,
    /// Midpoint of the curve, where blockage markers are placed.
    pub midpoint: MapPoint,
}

/// One entity on the picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub callsign: String,
    pub kind: EntityKind,
    /// Resolved map position. Route-bound progress is already evaluated
    /// through the curve; the renderer never does geometry.
    pub position: MapPoint,
    /// Route table index for route-bound entities.
    pub route: Option<usize>,
    /// Progress along the route in [0, 100], route-bound entities only.
    pub progress: Option<f64>,
    pub status: EntityStatus,
    pub telemetry: Option<TelemetryView>,
    pub vitals: Option<VitalsView>,
    pub category: Option<UnitCategory>,
    pub affiliation: Option<Affiliation>,
    pub selected: bool,
}

/// Telemetry readout for the detail card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TelemetryView {
    pub speed: f64,
    pub heading_deg: f64,
    pub altitude_ft: Option<f64>,
}

/// Vitals readout for the detail card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VitalsView {
    pub health: u8,
    pub ammo: u8,
    /// Health below threshold. Independent of the status enum.
    pub degraded: bool,
}
