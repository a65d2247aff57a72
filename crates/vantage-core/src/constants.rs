//! Simulation constants and tuning parameters.

/// Default picture tick rate (Hz).
pub const TICK_RATE: u32 = 10;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Ground movement (progress percent per tick) ---

/// Route-bound increment for a convoy in Normal (or still-Critical) status.
pub const GROUND_SPEED_NORMAL: f64 = 0.8;

/// Route-bound increment for a Delayed convoy.
pub const GROUND_SPEED_DELAYED: f64 = 0.2;

/// Creep increment while the assigned route is blocked. Strictly positive
/// so a blocked mover always makes eventual progress once cleared.
pub const GROUND_SPEED_BLOCKED: f64 = 0.1;

/// Route-bound increment for aerial assets, regardless of route health.
pub const AIR_SPEED: f64 = 1.5;

// --- Free-roaming units (normalized 0-100 plane) ---

/// Peak-to-peak positional jitter per tick (plus/minus half of this).
pub const UNIT_POSITION_JITTER: f64 = 0.5;

/// Peak-to-peak heading jitter per tick, degrees.
pub const UNIT_HEADING_JITTER_DEG: f64 = 10.0;

/// Peak-to-peak reported-speed jitter per tick.
pub const UNIT_SPEED_JITTER: f64 = 5.0;

/// Units are clamped to this interval on each axis so they never leave
/// the visible field.
pub const UNIT_PLANE_MIN: f64 = 5.0;
pub const UNIT_PLANE_MAX: f64 = 95.0;

// --- Vitals ---

/// Health below this marks a unit visually degraded. Health and status
/// are independent axes.
pub const HEALTH_DEGRADED_THRESHOLD: u8 = 50;

/// Upper bound for health and ammo.
pub const VITALS_MAX: u8 = 100;

// --- Reveal ---

/// Default reveal cadence for dispatch text (milliseconds per code point).
pub const REVEAL_INTERVAL_MS: u64 = 5;
