//! Cost evaluation.

use super::types::{CostBreakdown, CostWeights, LayoutMeasurements, RoutingMeasurements};

/// Combines layout and routing measurements into a weighted breakdown.
///
/// Missing and non-finite measurements contribute zero. When both sides
/// provide spans, the layout-side list wins.
pub fn compute_cost(
    layout: &LayoutMeasurements,
    routing: &RoutingMeasurements,
    weights: &CostWeights,
) -> CostBreakdown {
    let positions = sum_abs(layout.positions.as_deref());
    let spans = sum_finite(layout.spans.as_deref().or(routing.spans.as_deref()));
    let waste = scalar(layout.waste);
    let crossings = scalar(routing.crossings);
    let bends = scalar(routing.bends);
    let flow_out = scalar(layout.flow_out_violations);
    let flow_down = scalar(layout.flow_down_violations);

    let mut cost = CostBreakdown {
        total: 0.0,
        l: weighted(weights.l, positions),
        x: weighted(weights.x, crossings),
        b: weighted(weights.b, bends),
        f_out: weighted(weights.f_out, flow_out),
        f_down: weighted(weights.f_down, flow_down),
        f: weighted(weights.f, flow_out + flow_down),
        s_span: weighted(weights.s_span, spans),
        s_waste: weighted(weights.s_waste, waste),
        s: weighted(weights.s, spans + waste),
    };
    cost.total = cost.sum_of_terms();
    cost
}

/// Field-wise `next - prev`, `total` included.
pub fn compute_delta_cost(prev: &CostBreakdown, next: &CostBreakdown) -> CostBreakdown {
    CostBreakdown {
        total: next.total - prev.total,
        l: next.l - prev.l,
        x: next.x - prev.x,
        b: next.b - prev.b,
        f_out: next.f_out - prev.f_out,
        f_down: next.f_down - prev.f_down,
        f: next.f - prev.f,
        s_span: next.s_span - prev.s_span,
        s_waste: next.s_waste - prev.s_waste,
        s: next.s - prev.s,
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn scalar(v: Option<f64>) -> f64 {
    v.map_or(0.0, finite_or_zero)
}

fn sum_finite(values: Option<&[f64]>) -> f64 {
    values.map_or(0.0, |vs| vs.iter().copied().map(finite_or_zero).sum())
}

fn sum_abs(values: Option<&[f64]>) -> f64 {
    values.map_or(0.0, |vs| vs.iter().map(|v| finite_or_zero(v.abs())).sum())
}

fn weighted(weight: f64, value: f64) -> f64 {
    finite_or_zero(finite_or_zero(weight) * value)
}
