//! Snapshot system: queries the ECS world and builds a complete
//! `PictureSnapshot`.
//!
//! This system is read-only and never modifies the world. Route-bound
//! progress is resolved through the curve here, so the renderer receives
//! finished map coordinates.

use hecs::World;

use vantage_core::components::{
    AirAsset, Convoy, Identity, PathProgress, PlanePosition, TacticalUnit, Telemetry, Vitals,
};
use vantage_core::conditions::ExternalConditions;
use vantage_core::enums::{ConvoyStatus, EntityKind, EntityStatus, UnitStatus};
use vantage_core::route::RouteTable;
use vantage_core::state::{EntityView, PictureSnapshot, RouteView, TelemetryView, VitalsView};
use vantage_core::types::{MapPoint, SimTime};

/// Build a complete snapshot from the current world state.
pub fn build(
    world: &World,
    routes: &RouteTable,
    conditions: &ExternalConditions,
    time: &SimTime,
) -> PictureSnapshot {
    let mut entities = Vec::new();
    collect_haulers(world, routes, conditions, &mut entities);
    collect_units(world, routes, conditions, &mut entities);
    entities.sort_by_key(|e| e.id);

    PictureSnapshot {
        time: *time,
        routes: build_routes(routes, conditions),
        entities,
        selected: conditions.selected(),
    }
}

/// Route views in table order with live health.
fn build_routes(routes: &RouteTable, conditions: &ExternalConditions) -> Vec<RouteView> {
    routes
        .iter()
        .enumerate()
        .map(|(index, route)| RouteView {
            id: route.id,
            name: route.name.clone(),
            curve: route.curve,
            healthy: conditions.is_route_healthy(index),
            midpoint: route.curve.point_at(50.0),
        })
        .collect()
}

/// Convoys and air assets: resolve progress through the route curve.
fn collect_haulers(
    world: &World,
    routes: &RouteTable,
    conditions: &ExternalConditions,
    out: &mut Vec<EntityView>,
) {
    for (_e, (identity, _c, path, status)) in world
        .query::<(&Identity, &Convoy, &PathProgress, &ConvoyStatus)>()
        .iter()
    {
        out.push(hauler_view(
            identity,
            EntityKind::GroundConvoy,
            path,
            *status,
            routes,
            conditions,
        ));
    }
    for (_e, (identity, _a, path, status)) in world
        .query::<(&Identity, &AirAsset, &PathProgress, &ConvoyStatus)>()
        .iter()
    {
        out.push(hauler_view(
            identity,
            EntityKind::AerialAsset,
            path,
            *status,
            routes,
            conditions,
        ));
    }
}

fn hauler_view(
    identity: &Identity,
    kind: EntityKind,
    path: &PathProgress,
    status: ConvoyStatus,
    routes: &RouteTable,
    conditions: &ExternalConditions,
) -> EntityView {
    EntityView {
        id: identity.id,
        callsign: identity.callsign.clone(),
        kind,
        position: resolve_path(path, routes),
        route: Some(path.route),
        progress: Some(path.progress),
        status: EntityStatus::Hauling(status),
        telemetry: None,
        vitals: None,
        category: None,
        affiliation: None,
        selected: conditions.selected() == Some(identity.id),
    }
}

/// Tactical units, free-roaming or route-bound.
fn collect_units(
    world: &World,
    routes: &RouteTable,
    conditions: &ExternalConditions,
    out: &mut Vec<EntityView>,
) {
    for (_e, (identity, unit, status, telemetry, vitals, path, plane)) in world
        .query::<(
            &Identity,
            &TacticalUnit,
            &UnitStatus,
            &Telemetry,
            &Vitals,
            Option<&PathProgress>,
            Option<&PlanePosition>,
        )>()
        .iter()
    {
        let position = match (path, plane) {
            (Some(p), _) => resolve_path(p, routes),
            (None, Some(pp)) => MapPoint::new(pp.x, pp.y),
            (None, None) => MapPoint::default(),
        };
        out.push(EntityView {
            id: identity.id,
            callsign: identity.callsign.clone(),
            kind: EntityKind::TacticalUnit,
            position,
            route: path.map(|p| p.route),
            progress: path.map(|p| p.progress),
            status: EntityStatus::Unit(*status),
            telemetry: Some(TelemetryView {
                speed: telemetry.speed,
                heading_deg: telemetry.heading_deg,
                altitude_ft: telemetry.altitude_ft,
            }),
            vitals: Some(VitalsView {
                health: vitals.health,
                ammo: vitals.ammo,
                degraded: vitals.is_degraded(),
            }),
            category: Some(unit.category),
            affiliation: Some(unit.affiliation),
            selected: conditions.selected() == Some(identity.id),
        });
    }
}

/// A dangling reference resolves to the origin; motion has already logged
/// it and frozen the entity.
fn resolve_path(path: &PathProgress, routes: &RouteTable) -> MapPoint {
    routes
        .get(path.route)
        .map(|route| route.curve.point_at(path.progress))
        .unwrap_or_default()
}
