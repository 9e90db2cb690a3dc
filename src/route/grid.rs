//! Rasterization of obstacles into blocked grid cells.

use super::types::{Cell, Point, Rect};
use std::collections::HashSet;

/// Free cells kept around the routing area so paths can go around
/// obstacles that touch its border.
const SEARCH_MARGIN: i64 = 2;

/// Grid cells that paths may not enter.
#[derive(Debug, Clone, Default)]
pub struct BlockedSet {
    cells: HashSet<Cell>,
}

impl BlockedSet {
    /// Rasterizes obstacles (inflated by `padding`) and explicit blocked
    /// points at `step`.
    pub fn rasterize(obstacles: &[Rect], blocked_points: &[Point], step: f64, padding: f64) -> Self {
        let mut cells = HashSet::new();
        for rect in obstacles {
            let extent = [rect.x, rect.y, rect.width, rect.height];
            if extent.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let x0 = ((rect.x - padding) / step).floor() as i64;
            let x1 = ((rect.x + rect.width + padding) / step).ceil() as i64;
            let y0 = ((rect.y - padding) / step).floor() as i64;
            let y1 = ((rect.y + rect.height + padding) / step).ceil() as i64;
            for x in x0..=x1 {
                for y in y0..=y1 {
                    cells.insert((x, y));
                }
            }
        }
        for point in blocked_points {
            cells.insert(snap(*point, step));
        }
        Self { cells }
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Unblocks `cell`, returning whether it was blocked.
    pub fn remove(&mut self, cell: &Cell) -> bool {
        self.cells.remove(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

/// Inclusive search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Bounds {
    /// Bounding box of `endpoints` and `blocked`, widened by the search margin.
    pub fn enclosing(endpoints: &[Cell], blocked: &BlockedSet) -> Self {
        let mut bounds: Option<Bounds> = None;
        for &(x, y) in endpoints.iter().chain(blocked.iter()) {
            bounds = Some(match bounds {
                None => Bounds {
                    min_x: x,
                    max_x: x,
                    min_y: y,
                    max_y: y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            });
        }
        let b = bounds.unwrap_or(Bounds {
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
        });
        Bounds {
            min_x: b.min_x.saturating_sub(SEARCH_MARGIN),
            max_x: b.max_x.saturating_add(SEARCH_MARGIN),
            min_y: b.min_y.saturating_sub(SEARCH_MARGIN),
            max_y: b.max_y.saturating_add(SEARCH_MARGIN),
        }
    }

    pub fn contains(&self, (x, y): Cell) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Nearest grid cell to `point`. Non-finite coordinates snap to 0.
pub fn snap(point: Point, step: f64) -> Cell {
    (grid_coord(point.x / step), grid_coord(point.y / step))
}

fn grid_coord(v: f64) -> i64 {
    if v.is_finite() {
        v.round() as i64
    } else {
        0
    }
}

/// World coordinates of `cell`.
pub fn to_world((x, y): Cell, step: f64) -> Point {
    Point::new(x as f64 * step, y as f64 * step)
}
