//! Condition propagation: derive each entity's displayed status from the
//! current external conditions and its previous status.
//!
//! Recovery is deliberately hysteretic, one level per tick: a Critical
//! convoy downgrades to Delayed on the first healthy tick and holds there
//! until externally cleared. This keeps the display from flapping when a
//! condition toggles rapidly.

use hecs::World;

use vantage_core::components::{AirAsset, Convoy, Identity, PathProgress, TacticalUnit};
use vantage_core::conditions::ExternalConditions;
use vantage_core::enums::{ConvoyStatus, UnitStatus};

/// Run the propagator over every entity. Reads the condition snapshot
/// taken at the start of the tick; never reads wall clock or RNG.
pub fn run(world: &mut World, conditions: &ExternalConditions) {
    propagate_convoys(world, conditions);
    decay_air_assets(world);
    propagate_units(world, conditions);
}

/// Ground convoys: blocked route forces Critical; a healthy route lets a
/// Critical convoy recover one level, to Delayed, never straight to
/// Normal. Delayed holds until a ClearDelay command.
fn propagate_convoys(world: &mut World, conditions: &ExternalConditions) {
    for (_e, (_c, path, status)) in
        world.query_mut::<(&Convoy, &PathProgress, &mut ConvoyStatus)>()
    {
        if !conditions.is_route_healthy(path.route) {
            *status = ConvoyStatus::Critical;
        } else if *status == ConvoyStatus::Critical {
            *status = ConvoyStatus::Delayed;
        }
    }
}

/// Air assets never degrade from route health but share the recovery
/// decay.
fn decay_air_assets(world: &mut World) {
    for (_e, (_a, status)) in world.query_mut::<(&AirAsset, &mut ConvoyStatus)>() {
        if *status == ConvoyStatus::Critical {
            *status = ConvoyStatus::Delayed;
        }
    }
}

/// Tactical units: an external engagement flag or a blocked route under a
/// route-bound unit forces Engaged; recovery decays Engaged to Moving.
/// Moving and Active hold.
fn propagate_units(world: &mut World, conditions: &ExternalConditions) {
    for (_e, (identity, _u, path, status)) in world.query_mut::<(
        &Identity,
        &TacticalUnit,
        Option<&PathProgress>,
        &mut UnitStatus,
    )>() {
        let blocked = path.is_some_and(|p| !conditions.is_route_healthy(p.route));
        if conditions.is_engaged(identity.id) || blocked {
            *status = UnitStatus::Engaged;
        } else if *status == UnitStatus::Engaged {
            *status = UnitStatus::Moving;
        }
    }
}
