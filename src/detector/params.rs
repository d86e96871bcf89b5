//! Detection configuration: the only tunables the engine accepts.
//!
//! `DetectionConfig` is validated eagerly, both when deserialized and again
//! when a [`CorrosionDetector`](super::CorrosionDetector) is built, so no pixel
//! is processed with an out-of-range value.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_SENSITIVITY: f32 = 0.5;
pub const DEFAULT_MIN_AREA_PX: u32 = 200;

/// Pipeline environment the image was taken in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineType {
    Subsea,
    CrossCountry,
    #[default]
    General,
}

impl PipelineType {
    pub const ALL: [PipelineType; 3] = [
        PipelineType::Subsea,
        PipelineType::CrossCountry,
        PipelineType::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineType::Subsea => "subsea",
            PipelineType::CrossCountry => "cross_country",
            PipelineType::General => "general",
        }
    }
}

impl FromStr for PipelineType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subsea" => Ok(PipelineType::Subsea),
            "cross_country" | "cross-country" | "crosscountry" => Ok(PipelineType::CrossCountry),
            "general" | "unknown" => Ok(PipelineType::General),
            _ => Err(ConfigError::UnknownPipelineType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PipelineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PipelineType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Validated detection parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDetectionConfig")]
pub struct DetectionConfig {
    pub pipeline_type: PipelineType,
    /// `[0, 1]`; higher values make every signal more permissive.
    pub sensitivity: f32,
    /// Components smaller than this many pixels are discarded.
    pub min_area_px: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            pipeline_type: PipelineType::General,
            sensitivity: DEFAULT_SENSITIVITY,
            min_area_px: DEFAULT_MIN_AREA_PX,
        }
    }
}

impl DetectionConfig {
    /// Build and validate in one step.
    pub fn new(
        pipeline_type: PipelineType,
        sensitivity: f32,
        min_area_px: i64,
    ) -> Result<Self, ConfigError> {
        if min_area_px <= 0 {
            return Err(ConfigError::NonPositiveMinArea(min_area_px));
        }
        let config = Self {
            pipeline_type,
            sensitivity,
            min_area_px: u32::try_from(min_area_px).unwrap_or(u32::MAX),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.sensitivity) {
            return Err(ConfigError::SensitivityOutOfRange(self.sensitivity));
        }
        if self.min_area_px == 0 {
            return Err(ConfigError::NonPositiveMinArea(0));
        }
        Ok(())
    }
}

/// Wire form accepted from JSON before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDetectionConfig {
    #[serde(default, alias = "pipeline_type")]
    pipeline_type: Option<String>,
    #[serde(default = "default_sensitivity")]
    sensitivity: f32,
    #[serde(default = "default_min_area", alias = "min_area_px")]
    min_area_px: i64,
}

fn default_sensitivity() -> f32 {
    DEFAULT_SENSITIVITY
}

fn default_min_area() -> i64 {
    DEFAULT_MIN_AREA_PX as i64
}

impl TryFrom<RawDetectionConfig> for DetectionConfig {
    type Error = ConfigError;

    fn try_from(raw: RawDetectionConfig) -> Result<Self, Self::Error> {
        let pipeline_type = match raw.pipeline_type {
            Some(name) => name.parse()?,
            None => PipelineType::default(),
        };
        DetectionConfig::new(pipeline_type, raw.sensitivity, raw.min_area_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_values() {
        assert!(DetectionConfig::new(PipelineType::Subsea, 0.0, 1).is_ok());
        assert!(DetectionConfig::new(PipelineType::CrossCountry, 1.0, 1).is_ok());
    }

    #[test]
    fn rejects_out_of_range_sensitivity() {
        assert_eq!(
            DetectionConfig::new(PipelineType::General, 1.5, 100),
            Err(ConfigError::SensitivityOutOfRange(1.5))
        );
        assert!(matches!(
            DetectionConfig::new(PipelineType::General, f32::NAN, 100),
            Err(ConfigError::SensitivityOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_non_positive_min_area() {
        assert_eq!(
            DetectionConfig::new(PipelineType::General, 0.5, 0),
            Err(ConfigError::NonPositiveMinArea(0))
        );
        assert_eq!(
            DetectionConfig::new(PipelineType::General, 0.5, -20),
            Err(ConfigError::NonPositiveMinArea(-20))
        );
    }

    #[test]
    fn parses_pipeline_type_aliases() {
        assert_eq!(
            "cross-country".parse::<PipelineType>(),
            Ok(PipelineType::CrossCountry)
        );
        assert_eq!("Subsea".parse::<PipelineType>(), Ok(PipelineType::Subsea));
        assert_eq!("unknown".parse::<PipelineType>(), Ok(PipelineType::General));
        assert_eq!(
            "offshore".parse::<PipelineType>(),
            Err(ConfigError::UnknownPipelineType("offshore".into()))
        );
    }

    #[test]
    fn deserialization_validates() {
        let ok: DetectionConfig = serde_json::from_str(
            r#"{"pipelineType": "cross_country", "sensitivity": 0.7, "minAreaPx": 120}"#,
        )
        .expect("valid config");
        assert_eq!(ok.pipeline_type, PipelineType::CrossCountry);
        assert_eq!(ok.min_area_px, 120);

        let snake: DetectionConfig =
            serde_json::from_str(r#"{"pipeline_type": "subsea", "min_area_px": 80}"#)
                .expect("snake_case keys");
        assert_eq!(snake.pipeline_type, PipelineType::Subsea);
        assert_eq!(snake.sensitivity, DEFAULT_SENSITIVITY);

        let bad = serde_json::from_str::<DetectionConfig>(r#"{"sensitivity": -0.1}"#);
        assert!(bad.is_err());
        let unknown = serde_json::from_str::<DetectionConfig>(r#"{"pipelineType": "lunar"}"#);
        let message = unknown.expect_err("unknown type rejected").to_string();
        assert!(message.contains("lunar"), "{message}");
    }

    #[test]
    fn serialized_config_round_trips_through_validation() {
        let config = DetectionConfig::new(PipelineType::Subsea, 0.25, 300).expect("valid");
        let json = serde_json::to_string(&config).expect("serialize");
        let back: DetectionConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
