//! Error taxonomy for picture setup and per-entity updates.

use thiserror::Error;

/// Errors raised by the picture core.
///
/// `InvalidPath` and `DanglingRouteReference` are setup bugs and fatal for
/// the route or entity concerned. `InvalidProgress` is recoverable: callers
/// clamp and continue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PictureError {
    /// Malformed or unsupported curve definition. The route is rejected.
    #[error("invalid path for route {route}: {reason}")]
    InvalidPath { route: u32, reason: String },

    /// An entity references a route index that does not exist. Must never
    /// occur under normal operation; the entity is excluded from motion
    /// updates until corrected.
    #[error("entity {entity} references missing route index {route}")]
    DanglingRouteReference { entity: u32, route: usize },

    /// Externally supplied progress outside [0, 100]. Clamped by callers.
    #[error("progress {value} outside [0, 100]")]
    InvalidProgress { value: f64 },
}
