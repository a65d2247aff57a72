use glam::DVec2;

use crate::components::{Telemetry, Vitals};
use crate::conditions::ExternalConditions;
use crate::enums::*;
use crate::error::PictureError;
use crate::route::{Curve, RouteSpec, RouteTable};
use crate::state::PictureSnapshot;
use crate::types::{clamp_progress, wrap_heading, SimTime};

// ---- Path geometry ----

#[test]
fn test_line_endpoints_exact() {
    let curve = Curve::line(DVec2::new(380.0, 300.0), DVec2::new(520.0, 250.0));
    let start = curve.point_at(0.0);
    let end = curve.point_at(100.0);
    assert_eq!((start.x, start.y), (380.0, 300.0));
    assert_eq!((end.x, end.y), (520.0, 250.0));
}

#[test]
fn test_quadratic_endpoints_exact() {
    // Non-representable decimals on purpose: endpoint evaluation must be
    // exact, not within-epsilon.
    let curve = Curve::quadratic(
        DVec2::new(0.1, 0.2),
        DVec2::new(50.3, 99.9),
        DVec2::new(0.3, 0.7),
    );
    let start = curve.point_at(0.0);
    let end = curve.point_at(100.0);
    assert_eq!((start.x, start.y), (0.1, 0.2));
    assert_eq!((end.x, end.y), (0.3, 0.7));
}

#[test]
fn test_line_midpoint() {
    let curve = Curve::line(DVec2::new(0.0, 0.0), DVec2::new(100.0, 50.0));
    let mid = curve.point_at(50.0);
    assert!((mid.x - 50.0).abs() < 1e-12);
    assert!((mid.y - 25.0).abs() < 1e-12);
}

#[test]
fn test_quadratic_midpoint_blend() {
    // B(0.5) = 0.25*P0 + 0.5*C + 0.25*P1
    let curve = Curve::quadratic(
        DVec2::new(0.0, 0.0),
        DVec2::new(40.0, 80.0),
        DVec2::new(100.0, 0.0),
    );
    let mid = curve.point_at(50.0);
    assert!((mid.x - 45.0).abs() < 1e-12);
    assert!((mid.y - 40.0).abs() < 1e-12);
}

#[test]
fn test_point_at_is_pure() {
    let curve = Curve::quadratic(
        DVec2::new(380.0, 300.0),
        DVec2::new(300.0, 200.0),
        DVec2::new(280.0, 150.0),
    );
    let a = curve.point_at(37.5);
    for _ in 0..100 {
        assert_eq!(curve.point_at(37.5), a);
    }
}

#[test]
fn test_point_at_clamps_out_of_range_progress() {
    let curve = Curve::line(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
    assert_eq!(curve.point_at(-5.0), curve.point_at(0.0));
    assert_eq!(curve.point_at(250.0), curve.point_at(100.0));
}

// ---- Path parsing ----

#[test]
fn test_parse_line_path() {
    let curve = Curve::parse(1, "M 380 300 L 520 250").unwrap();
    assert_eq!(
        curve,
        Curve::line(DVec2::new(380.0, 300.0), DVec2::new(520.0, 250.0))
    );
}

#[test]
fn test_parse_quadratic_path() {
    let curve = Curve::parse(0, "M 380 300 Q 300 200 280 150").unwrap();
    assert_eq!(
        curve,
        Curve::quadratic(
            DVec2::new(380.0, 300.0),
            DVec2::new(300.0, 200.0),
            DVec2::new(280.0, 150.0),
        )
    );
}

#[test]
fn test_parse_rejects_unsupported_encodings() {
    for bad in [
        "",
        "L 10 10 M 0 0",
        "M 0 0 C 1 1 2 2 3 3",
        "M 0 0 Q 1 1",
        "M 0 0 L ten 10",
        "M 0 0",
        "M 0 0 L 1 1 extra",
    ] {
        let err = Curve::parse(7, bad).unwrap_err();
        assert!(
            matches!(err, PictureError::InvalidPath { route: 7, .. }),
            "path {bad:?} should be InvalidPath, got {err:?}"
        );
    }
}

#[test]
fn test_route_table_rejects_degenerate_curve() {
    let specs = vec![RouteSpec::new(0, "LOOPBACK", "M 10 10 L 10 10", true)];
    let err = RouteTable::new(&specs).unwrap_err();
    assert!(matches!(err, PictureError::InvalidPath { route: 0, .. }));
}

#[test]
fn test_route_table_build_and_lookup() {
    let specs = vec![
        RouteSpec::new(0, "NORTH", "M 380 300 Q 300 200 280 150", true),
        RouteSpec::new(1, "EAST", "M 380 300 L 520 250", false),
    ];
    let table = RouteTable::new(&specs).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0).unwrap().name, "NORTH");
    assert!(table.get(2).is_none());
    assert_eq!(table.initial_health(), &[true, false]);
}

// ---- Conditions ----

#[test]
fn test_toggle_route_flips_health() {
    let table = RouteTable::new(&[RouteSpec::new(0, "N", "M 0 0 L 1 1", true)]).unwrap();
    let mut conditions = ExternalConditions::for_table(&table);
    assert!(conditions.is_route_healthy(0));
    assert_eq!(conditions.toggle_route(0), Some(false));
    assert!(!conditions.is_route_healthy(0));
    assert_eq!(conditions.toggle_route(0), Some(true));
    assert_eq!(conditions.toggle_route(9), None);
}

#[test]
fn test_engagement_flags() {
    let mut conditions = ExternalConditions::default();
    assert!(!conditions.is_engaged(3));
    conditions.set_engaged(3, true);
    assert!(conditions.is_engaged(3));
    conditions.set_engaged(3, false);
    assert!(!conditions.is_engaged(3));
}

// ---- Types ----

#[test]
fn test_wrap_heading() {
    assert_eq!(wrap_heading(0.0), 0.0);
    assert_eq!(wrap_heading(360.0), 0.0);
    assert_eq!(wrap_heading(365.0), 5.0);
    assert_eq!(wrap_heading(-10.0), 350.0);
    assert!((wrap_heading(725.5) - 5.5).abs() < 1e-12);
}

#[test]
fn test_clamp_progress() {
    assert_eq!(clamp_progress(-3.0), 0.0);
    assert_eq!(clamp_progress(42.5), 42.5);
    assert_eq!(clamp_progress(140.0), 100.0);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..10 {
        time.advance(0.1);
    }
    assert_eq!(time.tick, 10);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
}

// ---- Components ----

#[test]
fn test_vitals_clamped_and_degraded() {
    let v = Vitals::new(150, 200);
    assert_eq!(v.health, 100);
    assert_eq!(v.ammo, 100);
    assert!(!v.is_degraded());

    assert!(!Vitals::new(50, 0).is_degraded());
    assert!(Vitals::new(49, 0).is_degraded());
}

#[test]
fn test_telemetry_normalizes_on_build() {
    let t = Telemetry::new(-5.0, 450.0, Some(15_400.0));
    assert_eq!(t.speed, 0.0);
    assert_eq!(t.heading_deg, 90.0);
    assert_eq!(t.altitude_ft, Some(15_400.0));
}

// ---- Serde ----

#[test]
fn test_status_enums_serde_round_trip() {
    let statuses = vec![
        EntityStatus::Hauling(ConvoyStatus::Normal),
        EntityStatus::Hauling(ConvoyStatus::Delayed),
        EntityStatus::Hauling(ConvoyStatus::Critical),
        EntityStatus::Unit(UnitStatus::Active),
        EntityStatus::Unit(UnitStatus::Engaged),
        EntityStatus::Unit(UnitStatus::Moving),
    ];
    for status in statuses {
        let json = serde_json::to_string(&status).unwrap();
        let back: EntityStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, back);
    }
}

#[test]
fn test_empty_snapshot_serializes() {
    let snapshot = PictureSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: PictureSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.entities.len(), 0);
    assert_eq!(back.time.tick, 0);
}
