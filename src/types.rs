//! Output data model handed to callers.
//!
//! Everything here is plain data with `Serialize`; the engine keeps no
//! reference to a result once returned.
use crate::color::ImageStats;
use crate::detector::PipelineType;
use crate::image::InputIssue;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Axis-aligned box in pixel coordinates; `x + width` is exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Centroid {
    pub x: f32,
    pub y: f32,
}

/// Coarse priority bucket. Ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive geometry of a region's pixel set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeMetrics {
    /// Pixels with at least one 4-neighbour outside the region.
    pub perimeter_px: u32,
    /// `4πA / P²`, clipped to `[0, 1]`.
    pub circularity: f32,
    /// Long over short bounding-box side, `>= 1`.
    pub aspect_ratio: f32,
    /// Region area over bounding-box area.
    pub extent: f32,
    /// Major over minor axis of the pixel distribution, `>= 1`.
    pub elongation: f32,
}

/// Per-term confidence breakdown; each term is in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceScores {
    pub agreement: f32,
    pub color_support: f32,
    pub area: f32,
    pub shape: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub bounding_box: BoundingBox,
    pub centroid: Centroid,
    pub area_px: u32,
    pub confidence: f32,
    pub severity: Severity,
    pub recommended_action: &'static str,
    pub shape: ShapeMetrics,
    pub scores: ConfidenceScores,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeverityHistogram {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityHistogram {
    pub fn add(&mut self, severity: Severity) {
        *self.slot(severity) += 1;
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }

    fn slot(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Low => &mut self.low,
            Severity::Medium => &mut self.medium,
            Severity::High => &mut self.high,
            Severity::Critical => &mut self.critical,
        }
    }
}

/// Whether the input image could be processed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "issue")]
pub enum InputStatus {
    #[default]
    Ok,
    InvalidInput(InputIssue),
}

impl InputStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, InputStatus::Ok)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetadata {
    pub pipeline_type: PipelineType,
    pub sensitivity: f32,
    pub min_area_px: u32,
    pub timestamp: DateTime<Utc>,
    pub width: usize,
    pub height: usize,
    pub input_status: InputStatus,
    pub image_stats: ImageStats,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Sorted by descending confidence, then area, then box position.
    pub regions: Vec<Region>,
    pub region_count: usize,
    /// Share of the image covered by regions, `[0, 100]`.
    pub total_area_pct: f32,
    pub total_area_px: u64,
    pub severity_histogram: SeverityHistogram,
    pub mean_confidence: f32,
    pub max_confidence: f32,
    pub processing_metadata: ProcessingMetadata,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
