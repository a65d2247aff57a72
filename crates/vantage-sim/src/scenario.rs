//! Default picture seeding.
//!
//! The stock scenario reproduces the dashboard's initial state: three
//! supply corridors out of the central hub (east corridor blocked), three
//! truck convoys plus a logistics drone, and five tactical units on the
//! normalized plane.

use vantage_core::commands::PictureCommand;
use vantage_core::components::{Telemetry, Vitals};
use vantage_core::enums::{Affiliation, ConvoyStatus, UnitCategory, UnitStatus};
use vantage_core::error::PictureError;
use vantage_core::route::{RouteSpec, RouteTable};

use crate::engine::SimulationEngine;

/// The three stock supply corridors, in map-canvas coordinates.
pub fn default_routes() -> Vec<RouteSpec> {
    vec![
        RouteSpec::new(0, "NORTH CORRIDOR", "M 380 300 Q 300 200 280 150", true),
        RouteSpec::new(1, "EAST CORRIDOR", "M 380 300 L 520 250", false),
        RouteSpec::new(2, "SOUTH CORRIDOR", "M 380 300 Q 350 450 250 450", true),
    ]
}

/// Build the validated stock route table.
pub fn default_route_table() -> Result<RouteTable, PictureError> {
    RouteTable::new(&default_routes())
}

/// Seed the stock entity population into a fresh engine.
pub fn seed_default_picture(engine: &mut SimulationEngine) -> Result<(), PictureError> {
    engine.spawn_convoy("C-ALPHA", 0, 10.0, ConvoyStatus::Normal)?;
    engine.spawn_convoy("C-BRAVO", 1, 60.0, ConvoyStatus::Delayed)?;
    engine.spawn_convoy("C-CHARLIE", 2, 30.0, ConvoyStatus::Normal)?;
    engine.spawn_air_asset("D-UAV-1", 0, 80.0, ConvoyStatus::Normal)?;

    let alpha_co = engine.spawn_unit(
        "ALPHA CO",
        UnitCategory::Infantry,
        Affiliation::Friendly,
        30.0,
        40.0,
        UnitStatus::Engaged,
        Vitals::new(85, 40),
        Telemetry::new(0.0, 45.0, None),
    );
    engine.spawn_unit(
        "BRAVO BAT",
        UnitCategory::Armor,
        Affiliation::Friendly,
        45.0,
        55.0,
        UnitStatus::Moving,
        Vitals::new(92, 78),
        Telemetry::new(45.0, 120.0, None),
    );
    engine.spawn_unit(
        "EAGLE 1",
        UnitCategory::Air,
        Affiliation::Friendly,
        60.0,
        20.0,
        UnitStatus::Active,
        Vitals::new(100, 100),
        Telemetry::new(280.0, 90.0, Some(15_400.0)),
    );
    let insurgents = engine.spawn_unit(
        "INSURGENT GRP A",
        UnitCategory::Infantry,
        Affiliation::Hostile,
        35.0,
        35.0,
        UnitStatus::Engaged,
        Vitals::new(40, 20),
        Telemetry::new(0.0, 225.0, None),
    );
    engine.spawn_unit(
        "UNKNOWN VEHICLE",
        UnitCategory::Armor,
        Affiliation::Hostile,
        70.0,
        60.0,
        UnitStatus::Moving,
        Vitals::new(100, 0),
        Telemetry::new(35.0, 270.0, None),
    );

    // The two seeded-Engaged units are in actual contact; flag the
    // condition so the propagator holds them Engaged.
    engine.queue_commands([
        PictureCommand::SetEngagement {
            entity: alpha_co,
            engaged: true,
        },
        PictureCommand::SetEngagement {
            entity: insurgents,
            engaged: true,
        },
    ]);

    Ok(())
}
