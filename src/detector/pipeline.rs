//! Detector pipeline driving corrosion detection end-to-end.
//!
//! The [`CorrosionDetector`] exposes a simple API: feed an RGB(A) view and get
//! scored regions, optionally with a trace of every stage.
//!
//! Typical usage:
//! ```no_run
//! use corrosion_detector::{CorrosionDetector, DetectionConfig, PipelineType};
//! use corrosion_detector::image::ColorImageU8;
//!
//! # fn example(pixels: &[u8], w: usize, h: usize) -> Result<(), corrosion_detector::ConfigError> {
//! let config = DetectionConfig::new(PipelineType::CrossCountry, 0.6, 150)?;
//! let detector = CorrosionDetector::new(config)?;
//! let result = detector.detect(ColorImageU8::rgb(w, h, pixels));
//! for region in &result.regions {
//!     println!("{:?} {:.3} {}", region.bounding_box, region.confidence, region.severity);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::DetectionConfig;
use super::profile::PipelineProfile;
use super::reporting::{assemble_result, MetadataInput};
use crate::color::{intensity_image, ImageStats};
use crate::diagnostics::{
    elapsed_ms, DetectionReport, InputDescriptor, PipelineTrace, StageCoverage, StageMasks,
    TimingBreakdown,
};
use crate::error::ConfigError;
use crate::image::ColorImageU8;
use crate::morphology;
use crate::regions::{extract_regions, score_region};
use crate::signals::{extract_signals, Window};
use crate::types::{DetectionResult, InputStatus};
use chrono::Utc;
use log::{debug, warn};
use std::time::Instant;

/// Corrosion detector bound to one validated configuration.
///
/// Holds no per-run state; `detect` takes `&self` and the detector can be
/// shared across threads.
#[derive(Clone, Debug)]
pub struct CorrosionDetector {
    config: DetectionConfig,
    profile: &'static PipelineProfile,
}

impl CorrosionDetector {
    /// Validate `config` and bind the matching pipeline profile.
    pub fn new(config: DetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            profile: config.pipeline_type.profile(),
            config,
        })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run the detector, returning only the result.
    pub fn detect(&self, image: ColorImageU8<'_>) -> DetectionResult {
        self.detect_with_diagnostics(image).result
    }

    /// Run the detector and return the result with a stage-by-stage trace.
    pub fn detect_with_diagnostics(&self, image: ColorImageU8<'_>) -> DetectionReport {
        let (width, height) = (image.w, image.h);
        let sensitivity = self.config.sensitivity;
        debug!(
            "CorrosionDetector::detect start w={} h={} type={} sensitivity={:.2} min_area={}",
            width, height, self.config.pipeline_type, sensitivity, self.config.min_area_px
        );
        let total_start = Instant::now();
        let input = InputDescriptor {
            width,
            height,
            channels: image.channels,
        };

        if let Err(issue) = image.validate() {
            warn!("CorrosionDetector::detect rejected input: {issue}");
            let meta = MetadataInput {
                width,
                height,
                input_status: InputStatus::InvalidInput(issue),
                image_stats: ImageStats::default(),
                timestamp: Utc::now(),
            };
            let result = assemble_result(Vec::new(), &self.config, meta);
            let timings = TimingBreakdown {
                total_ms: elapsed_ms(total_start),
                stages: Vec::new(),
            };
            return DetectionReport {
                result,
                trace: PipelineTrace {
                    input,
                    timings,
                    ..PipelineTrace::default()
                },
                masks: None,
            };
        }

        let mut timings = TimingBreakdown::default();
        let window = Window::for_image(width, height);

        let stage = Instant::now();
        let gray = intensity_image(&image);
        let image_stats = ImageStats::from_intensity(&gray);
        timings.push("intensity", elapsed_ms(stage));

        let signals = extract_signals(
            &image,
            &gray,
            window,
            self.profile,
            sensitivity,
            &mut timings,
        );
        debug!(
            "CorrosionDetector::detect signals window={} color={} texture={} edge={}",
            window.size(),
            signals.color.count(),
            signals.texture.count(),
            signals.edge.count()
        );

        let stage = Instant::now();
        let fused = signals.fuse(self.profile);
        timings.push("fusion", elapsed_ms(stage));

        let stage = Instant::now();
        let cleaned = morphology::clean(&fused);
        timings.push("morphology", elapsed_ms(stage));

        let stage = Instant::now();
        let extraction = extract_regions(&cleaned, self.config.min_area_px);
        timings.push("regions", elapsed_ms(stage));

        let stage = Instant::now();
        let regions = extraction
            .candidates
            .iter()
            .map(|candidate| score_region(candidate, &signals))
            .collect();
        timings.push("scoring", elapsed_ms(stage));

        let meta = MetadataInput {
            width,
            height,
            input_status: InputStatus::Ok,
            image_stats,
            timestamp: Utc::now(),
        };
        let result = assemble_result(regions, &self.config, meta);
        timings.total_ms = elapsed_ms(total_start);

        debug!(
            "CorrosionDetector::detect done components={} kept={} area_pct={:.2} total_ms={:.3}",
            extraction.components,
            result.region_count,
            result.total_area_pct,
            timings.total_ms
        );

        let masks = StageMasks {
            signals,
            fused,
            cleaned,
        };
        let trace = PipelineTrace {
            input,
            window: Some(window),
            timings,
            coverage: StageCoverage::from_masks(&masks),
            components: extraction.components,
            candidates: extraction.candidates.len(),
        };
        DetectionReport {
            result,
            trace,
            masks: Some(masks),
        }
    }
}

/// One-shot convenience wrapper: validate `config`, then detect.
pub fn detect_corrosion(
    image: ColorImageU8<'_>,
    config: &DetectionConfig,
) -> Result<DetectionResult, ConfigError> {
    Ok(CorrosionDetector::new(*config)?.detect(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::PipelineType;

    #[test]
    fn rejects_invalid_config_up_front() {
        let config = DetectionConfig {
            pipeline_type: PipelineType::General,
            sensitivity: 2.0,
            min_area_px: 10,
        };
        assert_eq!(
            CorrosionDetector::new(config).err(),
            Some(ConfigError::SensitivityOutOfRange(2.0))
        );
    }

    #[test]
    fn trace_lists_every_stage() {
        let pixels = vec![128u8; 32 * 24 * 3];
        let detector = CorrosionDetector::new(DetectionConfig::default()).expect("valid");
        let report = detector.detect_with_diagnostics(ColorImageU8::rgb(32, 24, &pixels));
        let labels: Vec<&str> = report.trace.timings.stages.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            [
                "intensity",
                "color",
                "texture",
                "edge",
                "fusion",
                "morphology",
                "regions",
                "scoring"
            ]
        );
        assert_eq!(report.trace.window, Some(Window { radius: 3 }));
        assert!(report.masks.is_some());
        assert!(report.result.processing_metadata.input_status.is_ok());
        assert_eq!(detector.config(), &DetectionConfig::default());
    }

    #[test]
    fn detector_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CorrosionDetector>();
    }
}
