//! Injected precise layout capability.
//!
//! The precise engine is opaque: it receives node rectangles and edges
//! by id and answers with per-edge geometry sections. Absence of a
//! precise router is always legal.

use crate::route::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Failure reported by a precise router. Surfaced to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("precise router failed: {message}")]
pub struct PreciseError {
    pub message: String,
}

impl PreciseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A node as handed to the precise router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBox {
    pub id: String,
    pub rect: Rect,
}

/// An edge between two nodes, by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Input to the precise router.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    pub nodes: Vec<NodeBox>,
    pub edges: Vec<GraphEdge>,
}

/// One geometry section of a laid-out edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeSection {
    pub start_point: Option<Point>,
    pub end_point: Option<Point>,
    pub bend_points: Vec<Point>,
}

/// Geometry computed for one edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaidOutEdge {
    pub id: String,
    #[serde(default)]
    pub sections: Vec<EdgeSection>,
}

impl LaidOutEdge {
    /// Sections concatenated (start, bends, end) with consecutive
    /// duplicates collapsed.
    pub fn points(&self) -> Vec<Point> {
        let mut out: Vec<Point> = Vec::new();
        for section in &self.sections {
            let pts = section
                .start_point
                .iter()
                .chain(section.bend_points.iter())
                .chain(section.end_point.iter());
            for &pt in pts {
                if out.last() != Some(&pt) {
                    out.push(pt);
                }
            }
        }
        out
    }
}

/// Output of the precise router.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutGraph {
    pub edges: Vec<LaidOutEdge>,
}

/// An expensive, exact layout engine.
///
/// Implementations run one layout per call. The facade awaits each call
/// before recording the step and imposes no timeout.
#[async_trait::async_trait]
pub trait PreciseRouter: Send + Sync {
    /// Lays out `graph` and returns its edge geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`PreciseError`] when the engine fails.
    async fn layout(&self, graph: &GraphDescriptor) -> Result<LayoutGraph, PreciseError>;
}
