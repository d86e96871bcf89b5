//! Result assembly: ordering, summary statistics and metadata.
use super::params::DetectionConfig;
use crate::color::ImageStats;
use crate::types::{
    DetectionResult, InputStatus, ProcessingMetadata, Region, SeverityHistogram,
};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Descending confidence, then descending area, then ascending box x and y.
pub fn region_order(a: &Region, b: &Region) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.area_px.cmp(&a.area_px))
        .then_with(|| a.bounding_box.x.cmp(&b.bounding_box.x))
        .then_with(|| a.bounding_box.y.cmp(&b.bounding_box.y))
}

/// Image-independent parts of the metadata.
pub(crate) struct MetadataInput {
    pub width: usize,
    pub height: usize,
    pub input_status: InputStatus,
    pub image_stats: ImageStats,
    pub timestamp: DateTime<Utc>,
}

impl MetadataInput {
    fn into_metadata(self, config: &DetectionConfig) -> ProcessingMetadata {
        ProcessingMetadata {
            pipeline_type: config.pipeline_type,
            sensitivity: config.sensitivity,
            min_area_px: config.min_area_px,
            timestamp: self.timestamp,
            width: self.width,
            height: self.height,
            input_status: self.input_status,
            image_stats: self.image_stats,
        }
    }
}

/// Sort regions and compute the image-level summary.
pub(crate) fn assemble_result(
    mut regions: Vec<Region>,
    config: &DetectionConfig,
    meta: MetadataInput,
) -> DetectionResult {
    regions.sort_by(region_order);

    let image_area = (meta.width as u64).saturating_mul(meta.height as u64);
    let total_area_px: u64 = regions.iter().map(|r| r.area_px as u64).sum();
    let total_area_pct = if image_area > 0 {
        ((total_area_px as f64 / image_area as f64) * 100.0).clamp(0.0, 100.0) as f32
    } else {
        0.0
    };

    let mut severity_histogram = SeverityHistogram::default();
    for region in &regions {
        severity_histogram.add(region.severity);
    }
    let max_confidence = regions.first().map_or(0.0, |r| r.confidence);
    let mean_confidence = if regions.is_empty() {
        0.0
    } else {
        regions.iter().map(|r| r.confidence).sum::<f32>() / regions.len() as f32
    };

    DetectionResult {
        region_count: regions.len(),
        regions,
        total_area_pct,
        total_area_px,
        severity_histogram,
        mean_confidence,
        max_confidence,
        processing_metadata: meta.into_metadata(config),
    }
}
