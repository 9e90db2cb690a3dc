//! Layout cost model.
//!
//! Turns raw layout and routing measurements into a weighted breakdown
//! over compactness (`L`), crossings (`X`), bends (`B`), flow-direction
//! violations (`F_out`, `F_down`, `F`) and span waste (`S_span`,
//! `S_waste`, `S`). Pure and deterministic.

mod model;
mod types;

pub use model::{compute_cost, compute_delta_cost};
pub use types::{CostBreakdown, CostWeights, LayoutMeasurements, RoutingMeasurements};
