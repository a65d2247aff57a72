//! Route definitions and path geometry.
//!
//! A route is a fixed curve on the map canvas. The table is built once,
//! validated, and never mutated; live route health is an external
//! condition, not a property of the table.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::PictureError;
use crate::types::MapPoint;

/// A parametric path on the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Curve {
    /// Straight segment between two points.
    Line { from: DVec2, to: DVec2 },
    /// Quadratic Bezier with a single control point.
    Quadratic { from: DVec2, ctrl: DVec2, to: DVec2 },
}

impl Curve {
    pub fn line(from: DVec2, to: DVec2) -> Self {
        Self::Line { from, to }
    }

    pub fn quadratic(from: DVec2, ctrl: DVec2, to: DVec2) -> Self {
        Self::Quadratic { from, ctrl, to }
    }

    /// Parse the compact path encoding used by the map data:
    /// `"M x y L x y"` for lines, `"M x y Q cx cy x y"` for quadratics.
    /// Anything else is an invalid path.
    pub fn parse(route: u32, path: &str) -> Result<Self, PictureError> {
        let invalid = |reason: &str| PictureError::InvalidPath {
            route,
            reason: reason.to_string(),
        };

        let tokens: Vec<&str> = path.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(invalid("empty path"));
        }
        if tokens[0] != "M" {
            return Err(invalid("path must start with M"));
        }

        let number = |tok: &str| -> Result<f64, PictureError> {
            let value: f64 = tok
                .parse()
                .map_err(|_| invalid(&format!("expected number, got '{tok}'")))?;
            if !value.is_finite() {
                return Err(invalid(&format!("non-finite coordinate '{tok}'")));
            }
            Ok(value)
        };

        match tokens.get(3).copied() {
            Some("L") if tokens.len() == 6 => Ok(Self::Line {
                from: DVec2::new(number(tokens[1])?, number(tokens[2])?),
                to: DVec2::new(number(tokens[4])?, number(tokens[5])?),
            }),
            Some("Q") if tokens.len() == 8 => Ok(Self::Quadratic {
                from: DVec2::new(number(tokens[1])?, number(tokens[2])?),
                ctrl: DVec2::new(number(tokens[4])?, number(tokens[5])?),
                to: DVec2::new(number(tokens[6])?, number(tokens[7])?),
            }),
            Some("L") | Some("Q") => Err(invalid("wrong coordinate count")),
            Some(cmd) => Err(invalid(&format!("unsupported command '{cmd}'"))),
            None => Err(invalid("truncated path")),
        }
    }

    /// Evaluate the curve at `progress` in [0, 100].
    ///
    /// Pure. Exact at the endpoints: `point_at(0.0)` is the start point and
    /// `point_at(100.0)` is the end point, with no accumulation drift.
    pub fn point_at(&self, progress: f64) -> MapPoint {
        let t = (progress / 100.0).clamp(0.0, 1.0);
        let u = 1.0 - t;
        let p = match *self {
            Self::Line { from, to } => from * u + to * t,
            Self::Quadratic { from, ctrl, to } => {
                from * (u * u) + ctrl * (2.0 * u * t) + to * (t * t)
            }
        };
        p.into()
    }

    fn endpoints(&self) -> (DVec2, DVec2) {
        match *self {
            Self::Line { from, to } | Self::Quadratic { from, to, .. } => (from, to),
        }
    }
}

/// Caller-facing route definition, consumed by `RouteTable::new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSpec {
    pub id: u32,
    pub name: String,
    /// Compact path encoding, see `Curve::parse`.
    pub path: String,
    /// Initial passability. Live health is tracked in `ExternalConditions`.
    pub healthy: bool,
}

impl RouteSpec {
    pub fn new(id: u32, name: &str, path: &str, healthy: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            path: path.to_string(),
            healthy,
        }
    }
}

/// A validated route in the immutable table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: u32,
    pub name: String,
    pub curve: Curve,
}

/// The immutable route table, validated once before the simulation starts.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    initial_health: Vec<bool>,
}

impl RouteTable {
    /// Build and validate the table. Fails on the first malformed or
    /// degenerate curve; a bad route is rejected, never silently defaulted.
    pub fn new(specs: &[RouteSpec]) -> Result<Self, PictureError> {
        let mut routes = Vec::with_capacity(specs.len());
        let mut initial_health = Vec::with_capacity(specs.len());

        for spec in specs {
            let curve = Curve::parse(spec.id, &spec.path)?;
            let (from, to) = curve.endpoints();
            if from == to {
                return Err(PictureError::InvalidPath {
                    route: spec.id,
                    reason: "degenerate curve: endpoints coincide".to_string(),
                });
            }
            routes.push(Route {
                id: spec.id,
                name: spec.name.clone(),
                curve,
            });
            initial_health.push(spec.healthy);
        }

        Ok(Self {
            routes,
            initial_health,
        })
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Per-route health at simulation start, in table order.
    pub fn initial_health(&self) -> &[bool] {
        &self.initial_health
    }
}
