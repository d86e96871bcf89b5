//! Diagnostics returned alongside a detection result.
//!
//! [`DetectionReport`] bundles the caller-facing [`DetectionResult`](crate::DetectionResult)
//! with a [`PipelineTrace`] (timings, window size, per-stage mask coverage,
//! component counts) and the intermediate masks themselves.

pub mod pipeline;
pub mod timing;

pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace, StageCoverage, StageMasks};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
