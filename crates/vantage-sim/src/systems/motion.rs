//! Motion system: per-tick position and telemetry updates, keyed by
//! entity kind.
//!
//! Rules:
//! - Route-bound convoys advance by a status-selected increment; a blocked
//!   route drops them to a small positive creep, never a full stop.
//! - Aerial assets advance at a fixed higher increment regardless of route
//!   health.
//! - Free-roaming units jitter position, heading, and reported speed,
//!   clamped to the visible field.
//! - Progress past 100 wraps to 0 (patrol loop).
//!
//! A failure while updating one entity (a dangling route reference) is
//! logged and leaves that entity's prior state unchanged for the tick; it
//! never aborts the rest of the pass.

use hecs::World;
use rand::Rng;
use tracing::error;

use vantage_core::components::{
    AirAsset, Convoy, Identity, PathProgress, PlanePosition, TacticalUnit, Telemetry,
};
use vantage_core::conditions::ExternalConditions;
use vantage_core::constants::{
    AIR_SPEED, GROUND_SPEED_BLOCKED, GROUND_SPEED_DELAYED, GROUND_SPEED_NORMAL,
    UNIT_HEADING_JITTER_DEG, UNIT_PLANE_MAX, UNIT_PLANE_MIN, UNIT_POSITION_JITTER,
    UNIT_SPEED_JITTER,
};
use vantage_core::enums::{ConvoyStatus, UnitCategory, UnitStatus};
use vantage_core::error::PictureError;
use vantage_core::route::RouteTable;
use vantage_core::types::wrap_heading;

/// Run the motion system over every entity.
pub fn run<R: Rng>(
    world: &mut World,
    routes: &RouteTable,
    conditions: &ExternalConditions,
    rng: &mut R,
) {
    advance_convoys(world, routes, conditions);
    advance_air_assets(world, routes);
    advance_bound_units(world, routes, conditions);
    perturb_free_units(world, rng);
}

/// Ground convoys: increment selected by status, creep while blocked.
fn advance_convoys(world: &mut World, routes: &RouteTable, conditions: &ExternalConditions) {
    for (_e, (identity, _c, path, status)) in
        world.query_mut::<(&Identity, &Convoy, &mut PathProgress, &ConvoyStatus)>()
    {
        if dangling(identity, path, routes) {
            continue;
        }
        let increment = if !conditions.is_route_healthy(path.route) {
            GROUND_SPEED_BLOCKED
        } else if *status == ConvoyStatus::Delayed {
            GROUND_SPEED_DELAYED
        } else {
            GROUND_SPEED_NORMAL
        };
        path.progress = wrap_progress(path.progress + increment);
    }
}

/// Aerial assets: fixed increment, route health ignored.
fn advance_air_assets(world: &mut World, routes: &RouteTable) {
    for (_e, (identity, _a, path)) in
        world.query_mut::<(&Identity, &AirAsset, &mut PathProgress)>()
    {
        if dangling(identity, path, routes) {
            continue;
        }
        path.progress = wrap_progress(path.progress + AIR_SPEED);
    }
}

/// Route-bound tactical units advance only while Moving, at ground speed
/// on a healthy route and at creep on a blocked one.
fn advance_bound_units(world: &mut World, routes: &RouteTable, conditions: &ExternalConditions) {
    for (_e, (identity, _u, path, status)) in
        world.query_mut::<(&Identity, &TacticalUnit, &mut PathProgress, &UnitStatus)>()
    {
        if dangling(identity, path, routes) {
            continue;
        }
        if *status != UnitStatus::Moving {
            continue;
        }
        let increment = if conditions.is_route_healthy(path.route) {
            GROUND_SPEED_NORMAL
        } else {
            GROUND_SPEED_BLOCKED
        };
        path.progress = wrap_progress(path.progress + increment);
    }
}

/// Free-roaming units: bounded random walk. Air-category units
/// self-animate regardless of status; the rest move only while Moving.
fn perturb_free_units<R: Rng>(world: &mut World, rng: &mut R) {
    for (_e, (unit, status, pos, telemetry)) in world.query_mut::<(
        &TacticalUnit,
        &UnitStatus,
        &mut PlanePosition,
        &mut Telemetry,
    )>() {
        if *status != UnitStatus::Moving && unit.category != UnitCategory::Air {
            continue;
        }

        let dx = (rng.gen::<f64>() - 0.5) * UNIT_POSITION_JITTER;
        let dy = (rng.gen::<f64>() - 0.5) * UNIT_POSITION_JITTER;
        pos.x = (pos.x + dx).clamp(UNIT_PLANE_MIN, UNIT_PLANE_MAX);
        pos.y = (pos.y + dy).clamp(UNIT_PLANE_MIN, UNIT_PLANE_MAX);

        let dh = (rng.gen::<f64>() - 0.5) * UNIT_HEADING_JITTER_DEG;
        telemetry.heading_deg = wrap_heading(telemetry.heading_deg + dh);

        let ds = (rng.gen::<f64>() - 0.5) * UNIT_SPEED_JITTER;
        telemetry.speed = (telemetry.speed + ds).max(0.0);
    }
}

/// Progress loops back to the start once past the end of the route.
fn wrap_progress(progress: f64) -> f64 {
    if progress > 100.0 {
        0.0
    } else {
        progress
    }
}

/// Check for a dangling route reference. Logged as a setup bug; the
/// entity keeps its prior state for this tick.
fn dangling(identity: &Identity, path: &PathProgress, routes: &RouteTable) -> bool {
    if routes.get(path.route).is_some() {
        return false;
    }
    let err = PictureError::DanglingRouteReference {
        entity: identity.id,
        route: path.route,
    };
    error!(%err, callsign = %identity.callsign, "entity excluded from motion update");
    true
}
