//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// A point on a widget's map surface.
///
/// Route-bound entities resolve to the route table's canvas coordinates;
/// free-roaming units live in the normalized 0-100 plane. Either way the
/// renderer receives a plain `{x, y}` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<glam::DVec2> for MapPoint {
    fn from(v: glam::DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt_secs` simulated seconds.
    pub fn advance(&mut self, dt_secs: f64) {
        self.tick += 1;
        self.elapsed_secs += dt_secs;
    }
}

/// Normalize a heading in degrees into [0, 360).
pub fn wrap_heading(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Clamp an externally supplied progress value into [0, 100].
pub fn clamp_progress(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
