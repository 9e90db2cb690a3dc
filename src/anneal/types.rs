//! Problem trait, moves, snapshots and transitions.

use crate::cost::CostBreakdown;
use crate::rng::RngState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines a layout optimization problem.
///
/// The engine owns the search: move proposal, temperature and
/// acceptance. The problem supplies the starting layout and the cost of
/// any candidate layout.
///
/// # Examples
///
/// ```ignore
/// struct Compact { nodes: usize }
///
/// impl AnnealProblem for Compact {
///     fn initial_layout(&self) -> Vec<i64> {
///         (0..self.nodes as i64).rev().collect()
///     }
///
///     fn evaluate(&self, layout: &[i64]) -> CostBreakdown {
///         let positions = layout.iter().map(|&p| p as f64).collect();
///         compute_cost(
///             &LayoutMeasurements { positions: Some(positions), ..Default::default() },
///             &RoutingMeasurements::default(),
///             &CostWeights::default(),
///         )
///     }
/// }
/// ```
pub trait AnnealProblem {
    /// Starting layout. Copied into the session at initialization.
    fn initial_layout(&self) -> Vec<i64>;

    /// Cost of a layout. Must be pure for replay to be exact.
    fn evaluate(&self, layout: &[i64]) -> CostBreakdown;
}

/// An [`AnnealProblem`] built from a layout and a cost closure.
pub struct FnProblem<F> {
    layout: Vec<i64>,
    cost_fn: F,
}

impl<F> FnProblem<F>
where
    F: Fn(&[i64]) -> CostBreakdown,
{
    pub fn new(layout: Vec<i64>, cost_fn: F) -> Self {
        Self { layout, cost_fn }
    }
}

impl<F> AnnealProblem for FnProblem<F>
where
    F: Fn(&[i64]) -> CostBreakdown,
{
    fn initial_layout(&self) -> Vec<i64> {
        self.layout.clone()
    }

    fn evaluate(&self, layout: &[i64]) -> CostBreakdown {
        (self.cost_fn)(layout)
    }
}

/// A layout perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MoveOp {
    /// Add `delta` to one position.
    Nudge { index: usize, delta: i64 },
    /// Exchange two positions.
    Swap { i: usize, j: usize },
    /// Remove at `from`, insert at `min(to, len)` after removal.
    Reinsert { from: usize, to: usize },
    /// Move the inclusive range `[start, end]` by `shift` slots.
    BlockShift { start: usize, end: usize, shift: i64 },
}

impl MoveOp {
    /// Stable name used in history exports.
    pub fn name(&self) -> &'static str {
        match self {
            MoveOp::Nudge { .. } => "nudge",
            MoveOp::Swap { .. } => "swap",
            MoveOp::Reinsert { .. } => "reinsert",
            MoveOp::BlockShift { .. } => "blockShift",
        }
    }
}

/// A proposed move plus the generator state after its draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub op: MoveOp,
    pub rng_after: RngState,
}

/// Why a transition was or was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcceptReason {
    Improved,
    Equal,
    Metropolis,
    Rejected,
}

impl AcceptReason {
    pub fn is_accepted(self) -> bool {
        !matches!(self, AcceptReason::Rejected)
    }
}

impl fmt::Display for AcceptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AcceptReason::Improved => "improved",
            AcceptReason::Equal => "equal",
            AcceptReason::Metropolis => "metropolis",
            AcceptReason::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Owned copy of the mutable session fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub iteration: u64,
    pub temperature: f64,
    pub layout: Vec<i64>,
    pub cost: CostBreakdown,
    pub rng: RngState,
}

/// Immutable record of one step.
///
/// `before` and `after` are independent copies; nothing here aliases the
/// live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub mv: Move,
    /// Cost of the candidate layout, accepted or not.
    pub candidate_cost: CostBreakdown,
    /// `candidate.total - current.total`.
    pub delta_cost: f64,
    pub accepted: bool,
    pub reason: AcceptReason,
    pub before: SessionState,
    pub after: SessionState,
}
