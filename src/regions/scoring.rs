//! Region confidence and severity.
//!
//! Confidence is a fixed linear blend of four terms, each in `[0, 1]`:
//!
//! | term          | weight | meaning                                          |
//! |---------------|--------|--------------------------------------------------|
//! | agreement     | 0.15   | share of pixels where ≥ 2 raw signals fired      |
//! | color support | 0.40   | share of pixels inside a rust color band         |
//! | area          | 0.25   | `1 - exp(-area / 1500)`                          |
//! | shape         | 0.20   | penalises thin boxes and thin pixel spreads      |
//!
//! Severity comes from [`SEVERITY_TABLE`], checked top to bottom. Both the
//! weights and the table are fixed policy, not inputs.
use super::extractor::RegionCandidate;
use crate::signals::SignalMasks;
use crate::types::{ConfidenceScores, Region, Severity, ShapeMetrics};

pub const AGREEMENT_WEIGHT: f32 = 0.15;
pub const COLOR_SUPPORT_WEIGHT: f32 = 0.40;
pub const AREA_WEIGHT: f32 = 0.25;
pub const SHAPE_WEIGHT: f32 = 0.20;

/// Area at which the area term reaches `1 - 1/e`.
pub const AREA_SCALE_PX: f32 = 1500.0;
/// Ratios up to this are fully regular.
pub const REGULAR_RATIO: f32 = 3.0;
/// Ratios at or above this score zero.
pub const MAX_RATIO: f32 = 10.0;

/// One row of the severity policy: both minima must be met.
#[derive(Clone, Copy, Debug)]
pub struct SeverityRule {
    pub severity: Severity,
    pub min_confidence: f32,
    pub min_area_px: u32,
}

pub static SEVERITY_TABLE: [SeverityRule; 3] = [
    SeverityRule {
        severity: Severity::Critical,
        min_confidence: 0.85,
        min_area_px: 5000,
    },
    SeverityRule {
        severity: Severity::High,
        min_confidence: 0.65,
        min_area_px: 2000,
    },
    SeverityRule {
        severity: Severity::Medium,
        min_confidence: 0.45,
        min_area_px: 250,
    },
];

pub fn classify_severity(confidence: f32, area_px: u32) -> Severity {
    SEVERITY_TABLE
        .iter()
        .find(|rule| confidence >= rule.min_confidence && area_px >= rule.min_area_px)
        .map_or(Severity::Low, |rule| rule.severity)
}

/// Maintenance recommendation attached to each severity.
pub fn recommended_action(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Immediate action required",
        Severity::High => "Schedule maintenance within 30 days",
        Severity::Medium => "Monitor and schedule maintenance within 90 days",
        Severity::Low => "Monitor during next routine inspection",
    }
}

/// Saturating area term.
pub fn area_term(area_px: u32) -> f32 {
    1.0 - (-(area_px as f32) / AREA_SCALE_PX).exp()
}

/// 1 up to [`REGULAR_RATIO`], falling linearly to 0 at [`MAX_RATIO`].
pub fn ratio_term(ratio: f32) -> f32 {
    ((MAX_RATIO - ratio) / (MAX_RATIO - REGULAR_RATIO)).clamp(0.0, 1.0)
}

pub fn shape_term(shape: &ShapeMetrics) -> f32 {
    ratio_term(shape.aspect_ratio).min(ratio_term(shape.elongation))
}

impl ConfidenceScores {
    /// Weighted blend, clipped to `[0, 1]`.
    pub fn confidence(&self) -> f32 {
        let raw = AGREEMENT_WEIGHT * self.agreement
            + COLOR_SUPPORT_WEIGHT * self.color_support
            + AREA_WEIGHT * self.area
            + SHAPE_WEIGHT * self.shape;
        raw.clamp(0.0, 1.0)
    }
}

/// Score the terms for one candidate against the raw signal masks.
pub fn score_terms(candidate: &RegionCandidate, signals: &SignalMasks) -> ConfidenceScores {
    let n = candidate.pixels.len().max(1) as f32;
    let (mut agreeing, mut colored) = (0usize, 0usize);
    for &idx in &candidate.pixels {
        if signals.agreement(idx) >= 2 {
            agreeing += 1;
        }
        if signals.color.is_set(idx) {
            colored += 1;
        }
    }
    ConfidenceScores {
        agreement: agreeing as f32 / n,
        color_support: colored as f32 / n,
        area: area_term(candidate.area),
        shape: shape_term(&candidate.shape),
    }
}

/// Turn a candidate into a scored, classified region.
pub fn score_region(candidate: &RegionCandidate, signals: &SignalMasks) -> Region {
    let scores = score_terms(candidate, signals);
    let confidence = scores.confidence();
    let severity = classify_severity(confidence, candidate.area);
    Region {
        bounding_box: candidate.bbox,
        centroid: candidate.centroid,
        area_px: candidate.area,
        confidence,
        severity,
        recommended_action: recommended_action(severity),
        shape: candidate.shape,
        scores,
    }
}
