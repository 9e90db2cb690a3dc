//! Batch draft routing.

use super::astar::{find_path, simplify};
use super::cost::evaluate_route_cost;
use super::grid::{snap, to_world, BlockedSet, Bounds};
use super::types::{Cell, DraftOptions, DraftResult, Edge, Point, Rect, Route};
use tracing::debug;

/// Routes `edges` on the grid around `obstacles` and `blocked_cells`.
///
/// Edges are routed in ascending id order. The interior cells of each
/// path are blocked afterwards, so earlier edges claim contested cells
/// and later edges detour. An edge whose target is unreachable gets the
/// direct two-point path.
pub fn route_draft(
    edges: &[Edge],
    obstacles: &[Rect],
    blocked_cells: &[Point],
    options: &DraftOptions,
) -> DraftResult {
    let step = if options.grid_step.is_finite() && options.grid_step > 0.0 {
        options.grid_step
    } else {
        1.0
    };
    let padding = if options.obstacle_padding.is_finite() {
        options.obstacle_padding.max(0.0)
    } else {
        0.0
    };

    let mut blocked = BlockedSet::rasterize(obstacles, blocked_cells, step, padding);

    let mut ordered: Vec<&Edge> = edges.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let endpoints: Vec<Cell> = ordered
        .iter()
        .flat_map(|e| [snap(e.from, step), snap(e.to, step)])
        .collect();
    let bounds = Bounds::enclosing(&endpoints, &blocked);

    let mut routes = Vec::with_capacity(ordered.len());
    for edge in ordered {
        let start = snap(edge.from, step);
        let goal = snap(edge.to, step);

        let start_was_blocked = blocked.remove(&start);
        let goal_was_blocked = blocked.remove(&goal);

        let path = find_path(start, goal, &blocked, &bounds).unwrap_or_else(|| {
            debug!(edge = %edge.id, ?start, ?goal, "no grid path, using direct segment");
            vec![start, goal]
        });

        if start_was_blocked {
            blocked.insert(start);
        }
        if goal_was_blocked {
            blocked.insert(goal);
        }
        if path.len() > 2 {
            for &cell in &path[1..path.len() - 1] {
                if cell != start && cell != goal {
                    blocked.insert(cell);
                }
            }
        }

        routes.push(Route {
            edge_id: edge.id.clone(),
            points: simplify(&path)
                .into_iter()
                .map(|cell| to_world(cell, step))
                .collect(),
        });
    }

    let cost = evaluate_route_cost(&routes);
    DraftResult { routes, cost }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_detours_around_obstacle() {
        let edges = [Edge::new("e", p(0.0, 0.0), p(4.0, 0.0))];
        let obstacle = Rect::new(1.0, -1.0, 2.0, 2.0);
        let result = route_draft(&edges, &[obstacle], &[], &DraftOptions::default());

        let points = &result.routes[0].points;
        assert_eq!(points.first(), Some(&p(0.0, 0.0)));
        assert_eq!(points.last(), Some(&p(4.0, 0.0)));
        assert!(points[1..points.len() - 1].iter().any(|pt| pt.y != 0.0));

        // Walk every unit cell of the simplified polyline.
        let blocked = BlockedSet::rasterize(&[obstacle], &[], 1.0, 0.0);
        for w in points.windows(2) {
            let (a, b) = (snap(w[0], 1.0), snap(w[1], 1.0));
            let (dx, dy) = ((b.0 - a.0).signum(), (b.1 - a.1).signum());
            let mut c = a;
            while c != b {
                assert!(!blocked.contains(&c));
                c = (c.0 + dx, c.1 + dy);
            }
        }
        assert_eq!(result.cost.bends, 2);
        assert!((result.cost.length - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_routes_in_id_order_and_deterministic() {
        let edges = vec![
            Edge::new("b", p(0.0, 2.0), p(4.0, 2.0)),
            Edge::new("a", p(2.0, 0.0), p(2.0, 4.0)),
        ];
        let first = route_draft(&edges, &[], &[], &DraftOptions::default());
        let again = route_draft(&edges, &[], &[], &DraftOptions::default());
        assert_eq!(first, again);
        let ids: Vec<&str> = first.routes.iter().map(|r| r.edge_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let mut reversed = edges.clone();
        reversed.reverse();
        assert_eq!(route_draft(&reversed, &[], &[], &DraftOptions::default()), first);
    }

    #[test]
    fn test_later_edges_avoid_earlier_paths() {
        // "a" claims the straight vertical line; "b" must not reuse it.
        let edges = vec![
            Edge::new("a", p(2.0, 0.0), p(2.0, 4.0)),
            Edge::new("b", p(2.0, 1.0), p(2.0, 3.0)),
        ];
        let result = route_draft(&edges, &[], &[], &DraftOptions::default());
        let b = &result.routes[1];
        assert!(b.points.iter().any(|pt| pt.x != 2.0));
    }

    #[test]
    fn test_enclosed_target_falls_back_to_direct_segment() {
        let walls = [
            p(5.0, 6.0),
            p(5.0, 4.0),
            p(6.0, 5.0),
            p(4.0, 5.0),
        ];
        let edges = [Edge::new("e", p(0.0, 0.0), p(5.0, 5.0))];
        let result = route_draft(&edges, &[], &walls, &DraftOptions::default());
        assert_eq!(result.routes[0].points, vec![p(0.0, 0.0), p(5.0, 5.0)]);
    }

    #[test]
    fn test_blocked_endpoint_is_temporarily_unblocked() {
        let edges = [Edge::new("e", p(0.0, 0.0), p(3.0, 0.0))];
        let result = route_draft(&edges, &[], &[p(3.0, 0.0)], &DraftOptions::default());
        assert_eq!(result.routes[0].points, vec![p(0.0, 0.0), p(3.0, 0.0)]);
    }

    #[test]
    fn test_grid_step_snaps_endpoints() {
        let edges = [Edge::new("e", p(1.0, 1.0), p(19.0, 1.0))];
        let result = route_draft(&edges, &[], &[], &DraftOptions::default().with_grid_step(10.0));
        assert_eq!(result.routes[0].points, vec![p(0.0, 0.0), p(20.0, 0.0)]);
    }

    #[test]
    fn test_non_finite_endpoint_routes_from_origin() {
        let edges = [Edge::new("e", p(f64::INFINITY, 0.0), p(2.0, 0.0))];
        let result = route_draft(&edges, &[], &[], &DraftOptions::default());
        assert_eq!(result.routes[0].points, vec![p(0.0, 0.0), p(2.0, 0.0)]);
        assert_eq!(result.cost.length, 2.0);
    }
}
