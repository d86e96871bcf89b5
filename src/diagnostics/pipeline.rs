use super::timing::TimingBreakdown;
use crate::image::Mask;
use crate::signals::{SignalMasks, Window};
use crate::types::DetectionResult;
use serde::Serialize;

/// Result produced by
/// [`CorrosionDetector::detect_with_diagnostics`](crate::CorrosionDetector::detect_with_diagnostics).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub trace: PipelineTrace,
    /// Intermediate masks; absent when the input was rejected.
    #[serde(skip)]
    pub masks: Option<StageMasks>,
}

/// What each stage did during one run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
    pub timings: TimingBreakdown,
    pub coverage: StageCoverage,
    /// Connected components found in the cleaned mask.
    pub components: usize,
    /// Components left after the area filter.
    pub candidates: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

/// Fraction of set pixels after each mask-producing stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCoverage {
    pub color: f32,
    pub texture: f32,
    pub edge: f32,
    pub fused: f32,
    pub cleaned: f32,
}

impl StageCoverage {
    pub fn from_masks(masks: &StageMasks) -> Self {
        Self {
            color: masks.signals.color.coverage(),
            texture: masks.signals.texture.coverage(),
            edge: masks.signals.edge.coverage(),
            fused: masks.fused.coverage(),
            cleaned: masks.cleaned.coverage(),
        }
    }
}

/// Every mask the pipeline produced, at input resolution.
#[derive(Clone, Debug)]
pub struct StageMasks {
    pub signals: SignalMasks,
    pub fused: Mask,
    pub cleaned: Mask,
}
