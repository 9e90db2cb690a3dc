//! Cost breakdown and measurement bundles.

use serde::{Deserialize, Serialize};

/// Weighted, decomposable layout cost. Lower is better.
///
/// `total` is the sum of the nine named terms. `f` and `s` are aggregates
/// of `f_out + f_down` and `s_span + s_waste`; with nonzero weights on
/// both the parts and the aggregate, that contribution is counted twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub total: f64,
    /// Compactness: sum of absolute positions.
    #[serde(rename = "L")]
    pub l: f64,
    /// Edge crossings.
    #[serde(rename = "X")]
    pub x: f64,
    /// Edge bends.
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "F_out")]
    pub f_out: f64,
    #[serde(rename = "F_down")]
    pub f_down: f64,
    #[serde(rename = "F")]
    pub f: f64,
    #[serde(rename = "S_span")]
    pub s_span: f64,
    #[serde(rename = "S_waste")]
    pub s_waste: f64,
    #[serde(rename = "S")]
    pub s: f64,
}

impl CostBreakdown {
    /// Canonical all-zero breakdown.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The nine non-total terms in export order.
    pub fn terms(&self) -> [f64; 9] {
        [
            self.l,
            self.x,
            self.b,
            self.f_out,
            self.f_down,
            self.f,
            self.s_span,
            self.s_waste,
            self.s,
        ]
    }

    /// Names matching [`terms`](Self::terms).
    pub const TERM_NAMES: [&'static str; 9] = [
        "L", "X", "B", "F_out", "F_down", "F", "S_span", "S_waste", "S",
    ];

    /// Sum of the nine terms.
    pub fn sum_of_terms(&self) -> f64 {
        self.terms().iter().sum()
    }
}

/// Measurements produced by the layout side. Missing fields count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutMeasurements {
    pub positions: Option<Vec<f64>>,
    pub spans: Option<Vec<f64>>,
    pub waste: Option<f64>,
    pub flow_out_violations: Option<f64>,
    pub flow_down_violations: Option<f64>,
}

/// Measurements produced by routing. Missing fields count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingMeasurements {
    pub crossings: Option<f64>,
    pub bends: Option<f64>,
    /// Used only when the layout side supplies no spans.
    pub spans: Option<Vec<f64>>,
}

/// Per-term multipliers. Every weight defaults to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "F_out")]
    pub f_out: f64,
    #[serde(rename = "F_down")]
    pub f_down: f64,
    #[serde(rename = "F")]
    pub f: f64,
    #[serde(rename = "S_span")]
    pub s_span: f64,
    #[serde(rename = "S_waste")]
    pub s_waste: f64,
    #[serde(rename = "S")]
    pub s: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            l: 1.0,
            x: 1.0,
            b: 1.0,
            f_out: 1.0,
            f_down: 1.0,
            f: 1.0,
            s_span: 1.0,
            s_waste: 1.0,
            s: 1.0,
        }
    }
}

impl CostWeights {
    /// All weights zero; combine with the `with_*` setters to pick terms.
    pub fn none() -> Self {
        Self {
            l: 0.0,
            x: 0.0,
            b: 0.0,
            f_out: 0.0,
            f_down: 0.0,
            f: 0.0,
            s_span: 0.0,
            s_waste: 0.0,
            s: 0.0,
        }
    }

    pub fn with_compactness(mut self, w: f64) -> Self {
        self.l = w;
        self
    }

    pub fn with_crossings(mut self, w: f64) -> Self {
        self.x = w;
        self
    }

    pub fn with_bends(mut self, w: f64) -> Self {
        self.b = w;
        self
    }

    /// Sets the `F_out`, `F_down` and aggregate `F` weights.
    pub fn with_flow(mut self, out: f64, down: f64, aggregate: f64) -> Self {
        self.f_out = out;
        self.f_down = down;
        self.f = aggregate;
        self
    }

    /// Sets the `S_span`, `S_waste` and aggregate `S` weights.
    pub fn with_span(mut self, span: f64, waste: f64, aggregate: f64) -> Self {
        self.s_span = span;
        self.s_waste = waste;
        self.s = aggregate;
        self
    }
}
