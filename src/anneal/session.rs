//! Annealing session: initialize, step, run, export.

use super::config::AnnealConfig;
use super::moves::{apply_op, propose};
use super::ring::TransitionRing;
use super::types::{AcceptReason, AnnealProblem, Move, SessionState, Transition};
use crate::cost::CostBreakdown;
use crate::error::LayoutError;
use crate::rng::RngState;
use tracing::{debug, trace};

/// Lower bound on the temperature used in the Metropolis exponent.
const TEMPERATURE_EPSILON: f64 = 1e-12;

/// Summary of a [`AnnealSession::run`] call.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Best layout seen during the run, including the starting layout.
    pub best: Vec<i64>,

    /// Cost of the best layout.
    pub best_cost: CostBreakdown,

    /// Steps executed by this run.
    pub steps: usize,

    /// Accepted steps (improved, equal and metropolis).
    pub accepted_moves: usize,

    /// Steps with a strictly negative delta.
    pub improving_moves: usize,

    /// Temperature after the last step.
    pub final_temperature: f64,

    /// Current total cost after each step.
    pub cost_history: Vec<f64>,
}

/// A mutable optimization session over one problem.
///
/// Fields are replaced once per [`step`](Self::step); every
/// [`Transition`] holds its own copies of the before/after state.
/// Given the same seed, problem and number of steps, the transition
/// sequence is reproduced exactly.
pub struct AnnealSession<P> {
    problem: P,
    config: AnnealConfig,
    seed: i32,
    state: SessionState,
    ring: TransitionRing<Transition>,
    full_trace: Option<Vec<Transition>>,
}

impl<P: AnnealProblem> AnnealSession<P> {
    /// Initializes a session at iteration 0.
    pub fn new(problem: P, config: AnnealConfig) -> Result<Self, LayoutError> {
        config.validate().map_err(LayoutError::InvalidConfig)?;

        let rng = match config.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let layout = problem.initial_layout();
        let cost = problem.evaluate(&layout);
        let state = SessionState {
            iteration: 0,
            temperature: config.initial_temperature,
            layout,
            cost,
            rng,
        };

        debug!(
            seed = rng.seed(),
            elements = state.layout.len(),
            initial_cost = cost.total,
            temperature = state.temperature,
            "anneal session initialized"
        );

        Ok(Self {
            problem,
            seed: rng.seed(),
            ring: TransitionRing::new(config.ring_capacity),
            full_trace: config.record_full_trace.then(Vec::new),
            config,
            state,
        })
    }

    /// Sanitized seed the session started from.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn iteration(&self) -> u64 {
        self.state.iteration
    }

    pub fn temperature(&self) -> f64 {
        self.state.temperature
    }

    pub fn layout(&self) -> &[i64] {
        &self.state.layout
    }

    pub fn cost(&self) -> &CostBreakdown {
        &self.state.cost
    }

    /// Proposes a move from the current state without changing it.
    pub fn propose(&self) -> Move {
        propose(&self.state.layout, self.state.rng, &self.config)
    }

    /// Builds the candidate state for `mv`: layout transformed, cost
    /// re-evaluated and RNG advanced to the move's post-proposal state.
    pub fn apply(&self, mv: &Move) -> SessionState {
        let layout = apply_op(&self.state.layout, &mv.op);
        let cost = self.problem.evaluate(&layout);
        SessionState {
            iteration: self.state.iteration,
            temperature: self.state.temperature,
            layout,
            cost,
            rng: mv.rng_after,
        }
    }

    /// Decides acceptance of `candidate` against the current state.
    pub fn decide(&self, mv: Move, candidate: SessionState) -> Transition {
        let current = &self.state;
        let delta_cost = candidate.cost.total - current.cost.total;
        let mut rng = candidate.rng;

        let reason = if delta_cost < 0.0 {
            AcceptReason::Improved
        } else if delta_cost == 0.0 {
            AcceptReason::Equal
        } else {
            let (u, next) = rng.next_f64();
            rng = next;
            let probability = (-delta_cost / current.temperature.max(TEMPERATURE_EPSILON)).exp();
            if u < probability {
                AcceptReason::Metropolis
            } else {
                AcceptReason::Rejected
            }
        };
        let accepted = reason.is_accepted();

        let (layout, cost) = if accepted {
            (candidate.layout, candidate.cost)
        } else {
            (current.layout.clone(), current.cost)
        };
        let after = SessionState {
            iteration: current.iteration + 1,
            temperature: self.cool(current.temperature),
            layout,
            cost,
            rng,
        };

        Transition {
            mv,
            candidate_cost: candidate.cost,
            delta_cost,
            accepted,
            reason,
            before: current.clone(),
            after,
        }
    }

    /// Propose, apply and decide as one update of the session.
    pub fn step(&mut self) -> Transition {
        let mv = self.propose();
        let candidate = self.apply(&mv);
        let transition = self.decide(mv, candidate);

        trace!(
            iteration = transition.before.iteration,
            move_type = transition.mv.op.name(),
            delta = transition.delta_cost,
            reason = %transition.reason,
            temperature = transition.after.temperature,
            "anneal step"
        );

        self.state = transition.after.clone();
        self.ring.push(transition.clone());
        if let Some(trace) = self.full_trace.as_mut() {
            trace.push(transition.clone());
        }
        transition
    }

    /// Executes `budget` steps.
    pub fn run(&mut self, budget: usize) -> AnnealResult {
        self.run_with_observer(budget, |_| {})
    }

    /// Executes `budget` steps, calling `on_step` after each one.
    pub fn run_with_observer<F>(&mut self, budget: usize, mut on_step: F) -> AnnealResult
    where
        F: FnMut(&Transition),
    {
        let mut best = self.state.layout.clone();
        let mut best_cost = self.state.cost;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = Vec::with_capacity(budget);

        for _ in 0..budget {
            let transition = self.step();
            if transition.accepted {
                accepted_moves += 1;
            }
            if transition.reason == AcceptReason::Improved {
                improving_moves += 1;
            }
            if transition.after.cost.total < best_cost.total {
                best = transition.after.layout.clone();
                best_cost = transition.after.cost;
            }
            cost_history.push(transition.after.cost.total);
            on_step(&transition);
        }

        debug!(
            steps = budget,
            accepted = accepted_moves,
            improved = improving_moves,
            best = best_cost.total,
            temperature = self.state.temperature,
            "anneal run finished"
        );

        AnnealResult {
            best,
            best_cost,
            steps: budget,
            accepted_moves,
            improving_moves,
            final_temperature: self.state.temperature,
            cost_history,
        }
    }

    /// Retained transitions, oldest first.
    pub fn export_transition_ring(&self) -> Vec<Transition> {
        self.ring.to_vec()
    }

    /// Every transition since initialization, or empty when the full
    /// trace is disabled.
    pub fn export_full_trace(&self) -> Vec<Transition> {
        self.full_trace.clone().unwrap_or_default()
    }

    fn cool(&self, temperature: f64) -> f64 {
        (temperature * self.config.cooling_rate).max(self.config.min_temperature)
    }
}
