//! Simulated annealing over 1-D layouts.
//!
//! A session holds one layout, its cost, the temperature and a
//! functional RNG state. Each step proposes a perturbation (`nudge`,
//! `swap`, `reinsert`, optionally `blockShift`), re-evaluates the cost
//! through the caller's [`AnnealProblem`], and accepts it by the
//! Metropolis rule. Steps are recorded as [`Transition`]s in a bounded
//! ring and, optionally, an unbounded trace.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod moves;
mod ring;
mod session;
mod types;

pub use config::AnnealConfig;
pub use moves::{apply_op, propose};
pub use ring::TransitionRing;
pub use session::{AnnealResult, AnnealSession};
pub use types::{AcceptReason, AnnealProblem, FnProblem, Move, MoveOp, SessionState, Transition};
