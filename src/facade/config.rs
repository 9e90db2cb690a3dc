//! Router facade configuration.

use crate::route::DraftOptions;
use serde::{Deserialize, Serialize};

/// Which router a step uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterMode {
    /// Grid router only.
    Draft,
    /// Precise router every step, falling back to draft geometry.
    Elk,
    /// Grid router, with a precise rescoring every `cadence` accepted
    /// steps and on the final step.
    #[default]
    Hybrid,
}

/// Configuration for [`RouterFacade`](super::RouterFacade).
///
/// # Examples
///
/// ```
/// use u_layoutopt::facade::{FacadeConfig, RouterMode};
///
/// let config = FacadeConfig::default()
///     .with_mode(RouterMode::Hybrid)
///     .with_cadence(5);
/// assert_eq!(config.cadence, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    pub mode: RouterMode,

    /// Accepted steps between precise rescorings in hybrid mode. At least 1.
    pub cadence: usize,

    /// Options for the grid router.
    pub draft: DraftOptions,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            mode: RouterMode::Hybrid,
            cadence: 10,
            draft: DraftOptions::default(),
        }
    }
}

impl FacadeConfig {
    pub fn with_mode(mut self, mode: RouterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cadence(mut self, cadence: usize) -> Self {
        self.cadence = cadence.max(1);
        self
    }

    pub fn with_draft_options(mut self, draft: DraftOptions) -> Self {
        self.draft = draft;
        self
    }
}
