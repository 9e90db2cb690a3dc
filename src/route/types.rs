//! Geometry and routing data types.

use serde::{Deserialize, Serialize};

/// Integer grid cell `(x, y)`.
pub type Cell = (i64, i64);

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its minimum corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// An edge to route between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from: Point,
    pub to: Point,
}

impl Edge {
    pub fn new(id: impl Into<String>, from: Point, to: Point) -> Self {
        Self {
            id: id.into(),
            from,
            to,
        }
    }
}

/// A routed polyline for one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub edge_id: String,
    pub points: Vec<Point>,
}

/// Geometric quality of a set of routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteCost {
    /// Total Manhattan length.
    pub length: f64,
    /// Direction changes within routes.
    pub bends: usize,
    /// Perpendicular segment intersections between different edges.
    pub crossings: usize,
    /// `length + 5 * bends + 20 * crossings`.
    pub total: f64,
}

/// Grid resolution and obstacle clearance for draft routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftOptions {
    /// World units per grid cell. Non-positive values fall back to 1.
    pub grid_step: f64,
    /// Clearance added around each obstacle, in world units.
    pub obstacle_padding: f64,
}

impl Default for DraftOptions {
    fn default() -> Self {
        Self {
            grid_step: 1.0,
            obstacle_padding: 0.0,
        }
    }
}

impl DraftOptions {
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step;
        self
    }

    pub fn with_obstacle_padding(mut self, padding: f64) -> Self {
        self.obstacle_padding = padding;
        self
    }
}

/// Output of [`route_draft`](super::route_draft).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftResult {
    /// Routes in processing order (ascending edge id).
    pub routes: Vec<Route>,
    pub cost: RouteCost,
}
