//! Geometric cost of routed polylines.

use super::types::{Point, Route, RouteCost};

pub const BEND_PENALTY: f64 = 5.0;
pub const CROSSING_PENALTY: f64 = 20.0;

const AXIS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
enum Segment {
    Horizontal { y: f64, x0: f64, x1: f64 },
    Vertical { x: f64, y0: f64, y1: f64 },
    Other,
}

impl Segment {
    fn between(a: Point, b: Point) -> Self {
        let horizontal = (a.y - b.y).abs() < AXIS_EPSILON;
        let vertical = (a.x - b.x).abs() < AXIS_EPSILON;
        match (horizontal, vertical) {
            (true, false) => Segment::Horizontal {
                y: a.y,
                x0: a.x.min(b.x),
                x1: a.x.max(b.x),
            },
            (false, true) => Segment::Vertical {
                x: a.x,
                y0: a.y.min(b.y),
                y1: a.y.max(b.y),
            },
            _ => Segment::Other,
        }
    }
}

fn crosses(a: Segment, b: Segment) -> bool {
    match (a, b) {
        (Segment::Vertical { x, y0, y1 }, Segment::Horizontal { y, x0, x1 })
        | (Segment::Horizontal { y, x0, x1 }, Segment::Vertical { x, y0, y1 }) => {
            x >= x0 && x <= x1 && y >= y0 && y <= y1
        }
        _ => false,
    }
}

fn segments(route: &Route) -> Vec<Segment> {
    route
        .points
        .windows(2)
        .map(|w| Segment::between(w[0], w[1]))
        .collect()
}

fn direction(a: Point, b: Point) -> Option<(i8, i8)> {
    let sign = |d: f64| {
        if d > AXIS_EPSILON {
            1
        } else if d < -AXIS_EPSILON {
            -1
        } else {
            0
        }
    };
    match (sign(b.x - a.x), sign(b.y - a.y)) {
        (0, 0) => None,
        dir => Some(dir),
    }
}

fn bends(route: &Route) -> usize {
    let mut count = 0;
    let mut last: Option<(i8, i8)> = None;
    for dir in route.points.windows(2).filter_map(|w| direction(w[0], w[1])) {
        if last.is_some_and(|prev| prev != dir) {
            count += 1;
        }
        last = Some(dir);
    }
    count
}

/// Scores routes by length, bends and crossings between different edges.
pub fn evaluate_route_cost(routes: &[Route]) -> RouteCost {
    let length: f64 = routes
        .iter()
        .flat_map(|r| r.points.windows(2))
        .map(|w| (w[1].x - w[0].x).abs() + (w[1].y - w[0].y).abs())
        .sum();
    let bends: usize = routes.iter().map(bends).sum();

    let per_route: Vec<Vec<Segment>> = routes.iter().map(segments).collect();
    let mut crossings = 0usize;
    for i in 0..routes.len() {
        for j in (i + 1)..routes.len() {
            if routes[i].edge_id == routes[j].edge_id {
                continue;
            }
            for &a in &per_route[i] {
                crossings += per_route[j].iter().filter(|&&b| crosses(a, b)).count();
            }
        }
    }

    RouteCost {
        length,
        bends,
        crossings,
        total: length + bends as f64 * BEND_PENALTY + crossings as f64 * CROSSING_PENALTY,
    }
}
