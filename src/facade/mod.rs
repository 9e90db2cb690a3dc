//! Routing policy over the grid router and an optional precise router.
//!
//! - `draft`: grid router only.
//! - `elk`: precise router every step; edges it leaves with fewer than
//!   two points keep their draft geometry.
//! - `hybrid`: grid router, plus a precise rescoring once `cadence`
//!   accepted steps have accumulated and on the final step.
//!
//! Every step appends a [`TraceEntry`] recording both candidate costs and
//! the selected score.

mod config;
mod precise;
mod router;

pub use config::{FacadeConfig, RouterMode};
pub use precise::{
    EdgeSection, GraphDescriptor, GraphEdge, LaidOutEdge, LayoutGraph, NodeBox, PreciseError,
    PreciseRouter,
};
pub use router::{
    FacadeStep, RouteOutcome, RouteRequest, RouteSource, RouterFacade, ScoreFn, TraceEntry,
};
