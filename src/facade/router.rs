//! Draft/precise routing policy with a per-step decision trace.

use super::config::{FacadeConfig, RouterMode};
use super::precise::{GraphDescriptor, GraphEdge, LaidOutEdge, NodeBox, PreciseRouter};
use crate::error::LayoutError;
use crate::route::{evaluate_route_cost, route_draft, Edge, Point, Rect, Route, RouteCost};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Caller-supplied score over the selected routes. Defaults to `cost.total`.
pub type ScoreFn = Arc<dyn Fn(&[Route], &RouteCost) -> f64 + Send + Sync>;

/// Everything needed to route one layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub nodes: Vec<NodeBox>,
    pub edges: Vec<GraphEdge>,
    /// Extra obstacles for the grid router. Nodes are not obstacles
    /// unless listed here.
    #[serde(default)]
    pub obstacles: Vec<Rect>,
    #[serde(default)]
    pub blocked_cells: Vec<Point>,
}

/// One step of a hybrid sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FacadeStep {
    pub request: RouteRequest,
    /// Whether the optimizer accepted this step.
    pub accepted: bool,
}

/// Router whose output was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Draft,
    Precise,
}

/// Decision record for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub step: usize,
    pub mode: RouterMode,
    pub accepted: bool,
    pub precise_invoked: bool,
    pub draft_cost: RouteCost,
    pub precise_cost: Option<RouteCost>,
    pub selected: RouteSource,
    pub selected_cost: RouteCost,
    pub score: f64,
}

/// Routes selected for a step.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub routes: Vec<Route>,
    pub cost: RouteCost,
    pub source: RouteSource,
    pub score: f64,
}

/// Chooses between the grid router and an optional precise router.
pub struct RouterFacade {
    config: FacadeConfig,
    precise: Option<Arc<dyn PreciseRouter>>,
    score: Option<ScoreFn>,
    accepted_since_precise: usize,
    steps: usize,
    trace: Vec<TraceEntry>,
}

impl RouterFacade {
    pub fn new(config: FacadeConfig) -> Self {
        Self {
            config,
            precise: None,
            score: None,
            accepted_since_precise: 0,
            steps: 0,
            trace: Vec::new(),
        }
    }

    pub fn with_precise(mut self, precise: Arc<dyn PreciseRouter>) -> Self {
        self.precise = Some(precise);
        self
    }

    pub fn with_score<F>(mut self, score: F) -> Self
    where
        F: Fn(&[Route], &RouteCost) -> f64 + Send + Sync + 'static,
    {
        self.score = Some(Arc::new(score));
        self
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Drops the trace and restarts step numbering and the cadence counter.
    pub fn clear_trace(&mut self) {
        self.trace.clear();
        self.steps = 0;
        self.accepted_since_precise = 0;
    }

    /// Routes a whole sequence; the last step is treated as final.
    pub async fn run(&mut self, steps: &[FacadeStep]) -> Result<Vec<RouteOutcome>, LayoutError> {
        let mut outcomes = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            let is_final = i + 1 == steps.len();
            outcomes.push(self.route_step(&step.request, step.accepted, is_final).await?);
        }
        Ok(outcomes)
    }

    /// Routes one step according to the configured mode.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] when an edge names a missing node, and
    /// [`LayoutError::Precise`] when the precise router fails. A failed
    /// step leaves the trace and the hybrid cadence counter untouched.
    pub async fn route_step(
        &mut self,
        request: &RouteRequest,
        accepted: bool,
        is_final: bool,
    ) -> Result<RouteOutcome, LayoutError> {
        let draft_routes = self.draft(request)?;
        let draft_cost = evaluate_route_cost(&draft_routes);
        let accepted_since_precise = self.accepted_since_precise + usize::from(accepted);
        let hybrid_due = self.config.mode == RouterMode::Hybrid
            && self.hybrid_due(accepted_since_precise, is_final);

        let precise = match self.config.mode {
            RouterMode::Draft => None,
            RouterMode::Elk => {
                if self.precise.is_none() {
                    warn!("elk mode without a precise router, using draft routes");
                }
                self.precise.clone()
            }
            RouterMode::Hybrid => {
                if hybrid_due {
                    self.precise.clone()
                } else {
                    None
                }
            }
        };

        let (routes, cost, source) = match precise {
            Some(router) => {
                debug!(step = self.steps, edges = request.edges.len(), "invoking precise router");
                let graph = GraphDescriptor {
                    nodes: request.nodes.clone(),
                    edges: request.edges.clone(),
                };
                let laid_out = router.layout(&graph).await?;
                let routes = merge_precise(&draft_routes, &laid_out.edges);
                let cost = evaluate_route_cost(&routes);
                (routes, cost, RouteSource::Precise)
            }
            None => (draft_routes, draft_cost, RouteSource::Draft),
        };

        let score = match &self.score {
            Some(f) => f(&routes, &cost),
            None => cost.total,
        };

        self.trace.push(TraceEntry {
            step: self.steps,
            mode: self.config.mode,
            accepted,
            precise_invoked: source == RouteSource::Precise,
            draft_cost,
            precise_cost: (source == RouteSource::Precise).then_some(cost),
            selected: source,
            selected_cost: cost,
            score,
        });
        self.steps += 1;
        if self.config.mode == RouterMode::Hybrid {
            self.accepted_since_precise = if hybrid_due { 0 } else { accepted_since_precise };
        }

        Ok(RouteOutcome {
            routes,
            cost,
            source,
            score,
        })
    }

    /// Whether a hybrid step with `accepted_since_precise` accepted steps
    /// (this one included) is due a precise rescoring.
    fn hybrid_due(&self, accepted_since_precise: usize, is_final: bool) -> bool {
        accepted_since_precise >= self.config.cadence.max(1) || is_final
    }

    fn draft(&self, request: &RouteRequest) -> Result<Vec<Route>, LayoutError> {
        let centers: HashMap<&str, Point> = request
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.rect.center()))
            .collect();
        let lookup = |edge: &GraphEdge, node: &str| {
            centers
                .get(node)
                .copied()
                .ok_or_else(|| LayoutError::UnknownNode {
                    edge: edge.id.clone(),
                    node: node.to_string(),
                })
        };

        let edges = request
            .edges
            .iter()
            .map(|e| -> Result<Edge, LayoutError> {
                Ok(Edge::new(e.id.clone(), lookup(e, &e.source)?, lookup(e, &e.target)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let result = route_draft(
            &edges,
            &request.obstacles,
            &request.blocked_cells,
            &self.config.draft,
        );
        Ok(result.routes)
    }
}

/// Precise geometry per edge, or the draft route when the precise
/// router returned fewer than two points for it.
fn merge_precise(draft: &[Route], precise: &[LaidOutEdge]) -> Vec<Route> {
    let by_id: HashMap<&str, Vec<Point>> = precise
        .iter()
        .map(|e| (e.id.as_str(), e.points()))
        .collect();

    draft
        .iter()
        .map(|route| match by_id.get(route.edge_id.as_str()) {
            Some(points) if points.len() >= 2 => Route {
                edge_id: route.edge_id.clone(),
                points: points.clone(),
            },
            _ => {
                warn!(edge = %route.edge_id, "precise route too short, using draft route");
                route.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::{EdgeSection, LayoutGraph, PreciseError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers with an L-shaped route for every edge except `skip`.
    struct MockPrecise {
        calls: AtomicUsize,
        skip: Option<String>,
    }

    impl MockPrecise {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                skip: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl PreciseRouter for MockPrecise {
        async fn layout(&self, graph: &GraphDescriptor) -> Result<LayoutGraph, PreciseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let edges = graph
                .edges
                .iter()
                .map(|e| LaidOutEdge {
                    id: e.id.clone(),
                    sections: if Some(&e.id) == self.skip.as_ref() {
                        vec![]
                    } else {
                        vec![EdgeSection {
                            start_point: Some(Point::new(0.0, 0.0)),
                            end_point: Some(Point::new(4.0, 4.0)),
                            bend_points: vec![Point::new(0.0, 4.0)],
                        }]
                    },
                })
                .collect();
            Ok(LayoutGraph { edges })
        }
    }

    struct FailingPrecise;

    #[async_trait::async_trait]
    impl PreciseRouter for FailingPrecise {
        async fn layout(&self, _graph: &GraphDescriptor) -> Result<LayoutGraph, PreciseError> {
            Err(PreciseError::new("engine crashed"))
        }
    }

    fn node(id: &str, x: f64, y: f64) -> NodeBox {
        NodeBox {
            id: id.into(),
            rect: Rect::new(x - 1.0, y - 1.0, 2.0, 2.0),
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    fn request() -> RouteRequest {
        RouteRequest {
            nodes: vec![node("a", 0.0, 0.0), node("b", 8.0, 0.0), node("c", 4.0, 6.0)],
            edges: vec![edge("e1", "a", "b"), edge("e2", "a", "c")],
            obstacles: vec![],
            blocked_cells: vec![],
        }
    }

    #[tokio::test]
    async fn test_draft_mode_never_calls_precise() {
        let precise = Arc::new(MockPrecise::new());
        let mut facade = RouterFacade::new(FacadeConfig::default().with_mode(RouterMode::Draft))
            .with_precise(precise.clone());
        let out = facade.route_step(&request(), true, true).await.unwrap();
        assert_eq!(out.source, RouteSource::Draft);
        assert_eq!(precise.calls.load(Ordering::SeqCst), 0);
        let entry = &facade.trace()[0];
        assert!(!entry.precise_invoked);
        assert!(entry.precise_cost.is_none());
        assert_eq!(entry.selected_cost, entry.draft_cost);
        assert_eq!(entry.score, entry.draft_cost.total);
    }

    #[tokio::test]
    async fn test_elk_mode_falls_back_per_edge() {
        let precise = Arc::new(MockPrecise {
            calls: AtomicUsize::new(0),
            skip: Some("e2".into()),
        });
        let mut facade = RouterFacade::new(FacadeConfig::default().with_mode(RouterMode::Elk))
            .with_precise(precise.clone());
        let out = facade.route_step(&request(), false, false).await.unwrap();

        let draft = facade.draft(&request()).unwrap();
        assert_eq!(out.source, RouteSource::Precise);
        assert_eq!(out.routes[0].points.len(), 3);
        assert_eq!(out.routes[1], draft[1]);
        assert_eq!(precise.calls.load(Ordering::SeqCst), 1);
        assert!(facade.trace()[0].precise_cost.is_some());
    }

    #[tokio::test]
    async fn test_elk_mode_without_precise_uses_draft() {
        let mut facade = RouterFacade::new(FacadeConfig::default().with_mode(RouterMode::Elk));
        let out = facade.route_step(&request(), true, false).await.unwrap();
        assert_eq!(out.source, RouteSource::Draft);
    }

    #[tokio::test]
    async fn test_hybrid_cadence() {
        let precise = Arc::new(MockPrecise::new());
        let mut facade = RouterFacade::new(FacadeConfig::default().with_cadence(10))
            .with_precise(precise.clone());
        // Ten accepted steps followed by two rejected ones.
        let steps: Vec<FacadeStep> = (0..12)
            .map(|i| FacadeStep {
                request: request(),
                accepted: i < 10,
            })
            .collect();
        let outcomes = facade.run(&steps).await.unwrap();

        assert_eq!(outcomes.len(), 12);
        assert_eq!(precise.calls.load(Ordering::SeqCst), 2);
        let invoked: Vec<usize> = facade
            .trace()
            .iter()
            .filter(|t| t.precise_invoked)
            .map(|t| t.step)
            .collect();
        assert_eq!(invoked, vec![9, 11]);
    }

    #[tokio::test]
    async fn test_hybrid_final_step_always_rescored() {
        let precise = Arc::new(MockPrecise::new());
        let mut facade = RouterFacade::new(FacadeConfig::default().with_cadence(10))
            .with_precise(precise.clone());
        let steps: Vec<FacadeStep> = (0..3)
            .map(|_| FacadeStep {
                request: request(),
                accepted: false,
            })
            .collect();
        facade.run(&steps).await.unwrap();
        assert_eq!(precise.calls.load(Ordering::SeqCst), 1);
        assert!(facade.trace()[2].precise_invoked);
    }

    #[tokio::test]
    async fn test_custom_score() {
        let mut facade = RouterFacade::new(FacadeConfig::default().with_mode(RouterMode::Draft))
            .with_score(|routes, _| routes.len() as f64 * 100.0);
        let out = facade.route_step(&request(), true, false).await.unwrap();
        assert_eq!(out.score, 200.0);
        assert_eq!(facade.trace()[0].score, 200.0);
    }

    #[tokio::test]
    async fn test_precise_failure_is_surfaced() {
        let mut facade = RouterFacade::new(FacadeConfig::default().with_mode(RouterMode::Elk))
            .with_precise(Arc::new(FailingPrecise));
        let err = facade.route_step(&request(), true, false).await.unwrap_err();
        assert!(matches!(err, LayoutError::Precise(ref e) if e.message == "engine crashed"));
        assert!(facade.trace().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_node() {
        let mut req = request();
        req.edges.push(edge("e3", "a", "zz"));
        let mut facade = RouterFacade::new(FacadeConfig::default());
        let err = facade.route_step(&req, true, false).await.unwrap_err();
        assert!(matches!(err, LayoutError::UnknownNode { ref node, .. } if node == "zz"));
    }

    #[tokio::test]
    async fn test_clear_trace_resets_cadence() {
        let precise = Arc::new(MockPrecise::new());
        let mut facade = RouterFacade::new(FacadeConfig::default().with_cadence(2))
            .with_precise(precise.clone());
        facade.route_step(&request(), true, false).await.unwrap();
        facade.clear_trace();
        facade.route_step(&request(), true, false).await.unwrap();
        assert_eq!(precise.calls.load(Ordering::SeqCst), 0);
        assert_eq!(facade.trace()[0].step, 0);
    }

    struct FlakyPrecise {
        failures_left: AtomicUsize,
        inner: MockPrecise,
    }

    #[async_trait::async_trait]
    impl PreciseRouter for FlakyPrecise {
        async fn layout(&self, graph: &GraphDescriptor) -> Result<LayoutGraph, PreciseError> {
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(PreciseError::new("transient"));
            }
            self.inner.layout(graph).await
        }
    }

    #[tokio::test]
    async fn test_failed_precise_call_keeps_cadence_counter() {
        let precise = Arc::new(FlakyPrecise {
            failures_left: AtomicUsize::new(1),
            inner: MockPrecise::new(),
        });
        let mut facade = RouterFacade::new(FacadeConfig::default().with_cadence(2))
            .with_precise(precise.clone());

        let first = facade.route_step(&request(), true, false).await.unwrap();
        assert_eq!(first.source, RouteSource::Draft);
        assert!(facade.route_step(&request(), true, false).await.is_err());

        // The rescoring is still due on the next step.
        let retry = facade.route_step(&request(), false, false).await.unwrap();
        assert_eq!(retry.source, RouteSource::Precise);
        assert_eq!(precise.inner.calls.load(Ordering::SeqCst), 1);

        let steps: Vec<(usize, bool)> = facade
            .trace()
            .iter()
            .map(|t| (t.step, t.precise_invoked))
            .collect();
        assert_eq!(steps, vec![(0, false), (1, true)]);
    }
}
