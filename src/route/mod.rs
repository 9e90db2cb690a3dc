//! Grid-based draft edge routing.
//!
//! Obstacles and explicit blocked points are rasterized onto an integer
//! grid; each edge is routed with 4-connected A* (Manhattan heuristic),
//! simplified, and its interior cells are blocked for later edges.
//! [`evaluate_route_cost`] scores any set of axis-aligned polylines.
//!
//! # References
//!
//! Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//! Determination of Minimum Cost Paths"

mod astar;
mod cost;
mod draft;
mod grid;
mod types;

pub use astar::{find_path, simplify};
pub use cost::{evaluate_route_cost, BEND_PENALTY, CROSSING_PENALTY};
pub use draft::route_draft;
pub use grid::{snap, to_world, BlockedSet, Bounds};
pub use types::{Cell, DraftOptions, DraftResult, Edge, Point, Rect, Route, RouteCost};
