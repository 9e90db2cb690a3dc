//! Layout optimization and edge routing for plate diagrams.
//!
//! Two coupled engines:
//!
//! - **Annealing** ([`anneal`]): a deterministic simulated-annealing
//!   session over a 1-D node ordering, with a pluggable cost callback,
//!   functional xorshift randomness ([`rng`]), Metropolis acceptance and
//!   bounded/unbounded transition history.
//! - **Routing** ([`route`]): obstacle-aware A* edge routing on an integer
//!   grid and a geometric route cost (length, bends, crossings).
//!
//! Supporting modules:
//!
//! - [`cost`]: weighted, decomposable layout cost.
//! - [`facade`]: draft/precise routing policy with a decision trace; the
//!   precise engine is an injected async capability.
//! - [`history`]: CSV/JSON history export and replayable debug sessions.
//!
//! # Architecture
//!
//! The annealing engine knows nothing about routing: each candidate
//! layout is scored through [`anneal::AnnealProblem::evaluate`], which
//! callers typically build from [`cost::compute_cost`] over layout and
//! routing measurements. The router and facade can be used on their own.

pub mod anneal;
pub mod cost;
pub mod error;
pub mod facade;
pub mod history;
pub mod rng;
pub mod route;

pub use error::LayoutError;
