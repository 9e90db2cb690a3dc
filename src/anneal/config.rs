//! Annealing configuration.

use serde::{Deserialize, Serialize};

/// Configuration for an annealing session.
///
/// Cooling is geometric with a floor: after every step,
/// `T = max(min_temperature, T * cooling_rate)`.
///
/// # Examples
///
/// ```
/// use u_layoutopt::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(10.0)
///     .with_cooling_rate(0.99)
///     .with_block_shift(true)
///     .with_ring_capacity(64)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// Temperature floor.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1].
    pub cooling_rate: f64,

    /// Largest magnitude of a `nudge` move.
    pub max_nudge_step: i64,

    /// Adds `blockShift` to the move pool.
    pub enable_block_shift: bool,

    /// Number of recent transitions retained. Values below 1 become 1.
    pub ring_capacity: usize,

    /// Keep every transition in an unbounded trace.
    pub record_full_trace: bool,

    /// Seed for reproducibility. `None` draws one at initialization.
    pub seed: Option<i32>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            min_temperature: 1e-4,
            cooling_rate: 0.995,
            max_nudge_step: 1,
            enable_block_shift: false,
            ring_capacity: 256,
            record_full_trace: false,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_nudge_step(mut self, step: i64) -> Self {
        self.max_nudge_step = step;
        self
    }

    pub fn with_block_shift(mut self, enabled: bool) -> Self {
        self.enable_block_shift = enabled;
        self
    }

    pub fn with_ring_capacity(mut self, capacity: usize) -> Self {
        self.ring_capacity = capacity.max(1);
        self
    }

    pub fn with_full_trace(mut self, enabled: bool) -> Self {
        self.record_full_trace = enabled;
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(format!(
                "initial_temperature must be finite and >= 0, got {}",
                self.initial_temperature
            ));
        }
        if !self.min_temperature.is_finite() || self.min_temperature < 0.0 {
            return Err(format!(
                "min_temperature must be finite and >= 0, got {}",
                self.min_temperature
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            ));
        }
        if self.max_nudge_step < 1 {
            return Err(format!(
                "max_nudge_step must be >= 1, got {}",
                self.max_nudge_step
            ));
        }
        Ok(())
    }
}
