use crate::detector::DetectionConfig;
use crate::error::IoError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `corrosion_scan` tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub resize: ResizeConfig,
    pub output: ScanOutputConfig,
}

/// Downscale applied before detection. Images are never upscaled.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeConfig {
    pub enabled: bool,
    pub max_width: usize,
    pub max_height: usize,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_width: 1024,
            max_height: 768,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutputConfig {
    pub result_json: PathBuf,
    /// Input image with region boxes drawn in severity colors.
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
    /// Cleaned detection mask as grayscale PNG.
    #[serde(default)]
    pub mask_image: Option<PathBuf>,
    /// Stage timings and coverage.
    #[serde(default)]
    pub trace_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ScanToolConfig, IoError> {
    let data = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&data).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(json: &str) -> Result<ScanToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::PipelineType;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse_config(
            r#"{"input": "pipe.jpg", "output": {"resultJson": "out/result.json"}}"#,
        )
        .expect("parse");
        assert_eq!(config.input, PathBuf::from("pipe.jpg"));
        assert_eq!(config.detection, DetectionConfig::default());
        assert_eq!(config.resize, ResizeConfig::default());
        assert!(config.output.overlay_image.is_none());
    }

    #[test]
    fn detection_block_is_validated() {
        let ok = parse_config(
            r#"{
                "input": "a.png",
                "detection": {"pipelineType": "subsea", "sensitivity": 0.8, "minAreaPx": 400},
                "resize": {"enabled": false},
                "output": {"resultJson": "r.json", "overlayImage": "o.png"}
            }"#,
        )
        .expect("parse");
        assert_eq!(ok.detection.pipeline_type, PipelineType::Subsea);
        assert!(!ok.resize.enabled);
        assert_eq!(ok.resize.max_width, 1024);

        let bad = parse_config(
            r#"{"input": "a.png", "detection": {"minAreaPx": 0}, "output": {"resultJson": "r.json"}}"#,
        );
        assert!(bad.is_err());
    }
}
