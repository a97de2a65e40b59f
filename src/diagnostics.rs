//! Structured diagnostics for frame resolution runs.
//!
//! [`FrameReport`] carries the outcome of a single image together with the
//! intermediate products of every stage; [`BatchReport`] aggregates
//! per-image outcomes so a failing sheet is reported and skipped instead of
//! aborting the run.

use crate::detector::FrameDetection;
use crate::error::FrameError;
use crate::types::{Corner, Line};
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one resolution run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub line_count: usize,
    pub width: u32,
    pub height: u32,
}

/// Intermediate products of each stage, filled as far as the run got.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Line indices per border cluster.
    pub groups: Vec<Vec<usize>>,
    /// One averaged line per cluster.
    pub representatives: Vec<Line>,
    /// Representatives after the optional inward offset.
    pub border_lines: Vec<Line>,
    pub intersections: Vec<Corner>,
}

/// Result of [`FrameResolver::resolve_detailed`](crate::FrameResolver::resolve_detailed).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<FrameDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub trace: FrameTrace,
}

impl FrameReport {
    pub fn is_success(&self) -> bool {
        self.detection.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFailure {
    pub name: String,
    pub reason: String,
}

/// Per-image outcome collector for batch runs.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: Vec<String>,
    pub failures: Vec<ImageFailure>,
}

impl BatchReport {
    pub fn record<T>(&mut self, name: impl Into<String>, outcome: &Result<T, FrameError>) {
        self.processed += 1;
        let name = name.into();
        match outcome {
            Ok(_) => self.succeeded.push(name),
            Err(err) => self.failures.push(ImageFailure {
                name,
                reason: err.to_string(),
            }),
        }
    }

    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}
