#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// Pipeline stages. Public so tools and tests can run them in isolation.
pub mod color;
pub mod edges;
pub mod filters;
pub mod morphology;
pub mod regions;
pub mod signals;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + configuration + results.
pub use crate::detector::{detect_corrosion, CorrosionDetector, DetectionConfig, PipelineType};
pub use crate::error::{ConfigError, IoError};
pub use crate::types::{
    BoundingBox, DetectionResult, InputStatus, ProcessingMetadata, Region, Severity,
    SeverityHistogram,
};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use corrosion_detector::prelude::*;
///
/// # fn main() -> Result<(), ConfigError> {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![128u8; w * h * 3];
/// let img = ColorImageU8::rgb(w, h, &rgb);
///
/// let det = CorrosionDetector::new(DetectionConfig {
///     pipeline_type: PipelineType::Subsea,
///     ..Default::default()
/// })?;
///
/// let result = det.detect(img);
/// println!("regions={} area={:.2}%", result.region_count, result.total_area_pct);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ColorImageU8;
    pub use crate::{
        ConfigError, CorrosionDetector, DetectionConfig, DetectionResult, PipelineType, Severity,
    };
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::diagnostics::{
        InputDescriptor, StageCoverage, StageMasks, StageTiming, TimingBreakdown,
    };
    pub use crate::morphology::{clean, close, dilate, erode, open, CLEAN_RADIUS};
    pub use crate::regions::{extract_regions, score_region, Extraction, RegionCandidate};
    pub use crate::signals::{
        color_mask, edge_mask, extract_signals, fuse, texture_mask, EdgeField, SignalMasks, Window,
    };
}
