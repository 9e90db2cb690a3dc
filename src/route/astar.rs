//! 4-connected A* search on the blocked grid, plus path simplification.

use super::grid::{BlockedSet, Bounds};
use super::types::Cell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

const NEIGHBORS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn manhattan(a: Cell, b: Cell) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Shortest 4-connected path from `start` to `goal` avoiding `blocked`,
/// or `None` when the goal is unreachable inside `bounds`.
///
/// The open set pops lowest `f = g + h` first, then lowest `x`, then
/// lowest `y`, so ties always resolve the same way.
pub fn find_path(start: Cell, goal: Cell, blocked: &BlockedSet, bounds: &Bounds) -> Option<Vec<Cell>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<Cell, i64> = HashMap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();

    g_score.insert(start, 0);
    open.push(Reverse((manhattan(start, goal), start.0, start.1)));

    while let Some(Reverse((_, x, y))) = open.pop() {
        let current = (x, y);
        if current == goal {
            return Some(reconstruct(&came_from, goal));
        }
        if !closed.insert(current) {
            continue;
        }
        let g = g_score.get(&current).copied().unwrap_or(i64::MAX);

        for (dx, dy) in NEIGHBORS {
            let next = (x + dx, y + dy);
            if !bounds.contains(next) || blocked.contains(&next) || closed.contains(&next) {
                continue;
            }
            let tentative = g + 1;
            if tentative < g_score.get(&next).copied().unwrap_or(i64::MAX) {
                g_score.insert(next, tentative);
                came_from.insert(next, current);
                open.push(Reverse((tentative + manhattan(next, goal), next.0, next.1)));
            }
        }
    }
    None
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Drops consecutive duplicates and interior points of straight runs.
pub fn simplify(path: &[Cell]) -> Vec<Cell> {
    let mut deduped: Vec<Cell> = Vec::with_capacity(path.len());
    for &cell in path {
        if deduped.last() != Some(&cell) {
            deduped.push(cell);
        }
    }
    if deduped.len() <= 2 {
        return deduped;
    }

    let mut out = vec![deduped[0]];
    for window in deduped.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        let (d1x, d1y) = (b.0 - a.0, b.1 - a.1);
        let (d2x, d2y) = (c.0 - b.0, c.1 - b.1);
        let collinear = d1x * d2y - d1y * d2x == 0 && d1x * d2x + d1y * d2y > 0;
        if !collinear {
            out.push(b);
        }
    }
    if let Some(&last) = deduped.last() {
        out.push(last);
    }
    out
}
