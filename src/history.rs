//! History export and persisted debug sessions.
//!
//! Nothing here touches the filesystem; callers decide where the CSV,
//! JSON or session record goes.

use crate::anneal::{AnnealConfig, SessionState, Transition};
use crate::cost::CostBreakdown;
use crate::error::LayoutError;
use serde::{Deserialize, Serialize};

/// One row of optimization history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub iter: u64,
    pub temp: f64,
    pub accepted: bool,
    pub move_type: String,
    pub cost: CostBreakdown,
}

impl HistoryPoint {
    /// Row for the state after `transition`.
    pub fn from_transition(transition: &Transition) -> Self {
        Self {
            iter: transition.after.iteration,
            temp: transition.after.temperature,
            accepted: transition.accepted,
            move_type: transition.mv.op.name().to_string(),
            cost: transition.after.cost,
        }
    }
}

/// CSV with header `iter,temp,accepted,moveType,total,<terms...>`.
pub fn history_to_csv(points: &[HistoryPoint]) -> Result<String, LayoutError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["iter", "temp", "accepted", "moveType", "total"];
    header.extend(CostBreakdown::TERM_NAMES);
    writer.write_record(&header)?;

    for point in points {
        let mut record = vec![
            point.iter.to_string(),
            point.temp.to_string(),
            point.accepted.to_string(),
            point.move_type.clone(),
            point.cost.total.to_string(),
        ];
        record.extend(point.cost.terms().iter().map(f64::to_string));
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| LayoutError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| LayoutError::Export(err.to_string()))
}

/// Pretty-printed JSON array.
pub fn history_to_json(points: &[HistoryPoint]) -> Result<String, LayoutError> {
    Ok(serde_json::to_string_pretty(points)?)
}

/// Replayable record of a debugging session.
///
/// `snapshots[0]` is the initial state; each recorded step appends one
/// snapshot, transition and history point and moves `cursor` to the
/// newest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugSession {
    pub seed: i32,
    pub config: AnnealConfig,
    pub initial_layout: Vec<i64>,
    pub cursor: usize,
    pub snapshots: Vec<SessionState>,
    pub transitions: Vec<Transition>,
    pub history: Vec<HistoryPoint>,
}

impl DebugSession {
    pub fn new(seed: i32, config: AnnealConfig, initial: SessionState) -> Self {
        Self {
            seed,
            config,
            initial_layout: initial.layout.clone(),
            cursor: 0,
            snapshots: vec![initial],
            transitions: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Appends one step.
    pub fn record(&mut self, transition: &Transition) {
        self.snapshots.push(transition.after.clone());
        self.history.push(HistoryPoint::from_transition(transition));
        self.transitions.push(transition.clone());
        self.cursor = self.snapshots.len() - 1;
    }

    /// Moves the cursor, clamped to the recorded snapshots. A record
    /// without snapshots keeps the cursor at 0 and yields `None`.
    pub fn seek(&mut self, cursor: usize) -> Option<&SessionState> {
        self.cursor = cursor.min(self.snapshots.len().saturating_sub(1));
        self.snapshots.get(self.cursor)
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&SessionState> {
        self.snapshots.get(self.cursor)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}
