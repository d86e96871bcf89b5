//! Per-pipeline-type tuning tables.
//!
//! Every pipeline type runs the same stages; they differ only in the numbers
//! below. Tables are `static` and never mutated. Values are calibrated at
//! sensitivity 0.5; each signal module scales them linearly with sensitivity.
//!
//! Hue is in half-degrees `[0, 180)`, saturation and value in `[0, 255]`,
//! texture cutoffs in intensity standard deviation, edge magnitudes in Sobel
//! units on 8-bit intensity.
use super::params::PipelineType;
use serde::Serialize;

/// One rust-colored HSV band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBand {
    pub hue_low: f32,
    pub hue_high: f32,
    pub sat_min: f32,
    pub val_min: f32,
    pub val_max: f32,
}

impl ColorBand {
    const fn new(hue_low: f32, hue_high: f32, sat_min: f32, val_min: f32, val_max: f32) -> Self {
        Self {
            hue_low,
            hue_high,
            sat_min,
            val_min,
            val_max,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureProfile {
    /// Local standard deviation above which a pixel reads as rough.
    pub std_cutoff: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeProfile {
    /// Minimum thinned gradient magnitude of an edge pixel.
    pub magnitude: f32,
    /// Minimum fraction of window pixels that are edge pixels.
    pub density: f32,
    /// Windows whose edge orientation coherence exceeds this are treated as
    /// structural (seams, welds) and dropped.
    pub max_linearity: f32,
}

/// Non-negative vote weights; only their ratios matter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionWeights {
    pub color: f32,
    pub texture: f32,
    pub edge: f32,
}

impl FusionWeights {
    pub fn total(&self) -> f32 {
        self.color + self.texture + self.edge
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineProfile {
    pub color_bands: &'static [ColorBand],
    pub texture: TextureProfile,
    pub edge: EdgeProfile,
    pub fusion: FusionWeights,
}

// Subsea: biofouling and poor light shift rust darker and less saturated;
// bands stay narrow in hue and reach into low values.
static SUBSEA_BANDS: [ColorBand; 3] = [
    ColorBand::new(5.0, 15.0, 60.0, 35.0, 255.0),
    ColorBand::new(0.0, 9.0, 60.0, 35.0, 255.0),
    ColorBand::new(9.0, 20.0, 50.0, 15.0, 150.0),
];

// Cross-country: atmospheric corrosion under varied daylight; broad bands
// including yellow-brown oxidation tones.
static CROSS_COUNTRY_BANDS: [ColorBand; 4] = [
    ColorBand::new(4.0, 16.0, 60.0, 45.0, 255.0),
    ColorBand::new(0.0, 10.0, 55.0, 45.0, 255.0),
    ColorBand::new(10.0, 22.0, 45.0, 30.0, 210.0),
    ColorBand::new(15.0, 30.0, 50.0, 50.0, 255.0),
];

static GENERAL_BANDS: [ColorBand; 4] = [
    ColorBand::new(5.0, 15.0, 50.0, 50.0, 255.0),
    ColorBand::new(0.0, 10.0, 50.0, 50.0, 255.0),
    ColorBand::new(10.0, 25.0, 50.0, 30.0, 200.0),
    ColorBand::new(15.0, 30.0, 50.0, 50.0, 255.0),
];

pub static SUBSEA: PipelineProfile = PipelineProfile {
    color_bands: &SUBSEA_BANDS,
    texture: TextureProfile { std_cutoff: 10.0 },
    edge: EdgeProfile {
        magnitude: 60.0,
        density: 0.10,
        max_linearity: 0.75,
    },
    // Color is unreliable under marine growth; roughness carries more weight
    // and passes the vote on its own.
    fusion: FusionWeights {
        color: 0.40,
        texture: 0.45,
        edge: 0.15,
    },
};

pub static CROSS_COUNTRY: PipelineProfile = PipelineProfile {
    color_bands: &CROSS_COUNTRY_BANDS,
    texture: TextureProfile { std_cutoff: 14.0 },
    edge: EdgeProfile {
        magnitude: 90.0,
        density: 0.12,
        max_linearity: 0.7,
    },
    fusion: FusionWeights {
        color: 0.70,
        texture: 0.20,
        edge: 0.10,
    },
};

pub static GENERAL: PipelineProfile = PipelineProfile {
    color_bands: &GENERAL_BANDS,
    texture: TextureProfile { std_cutoff: 12.0 },
    edge: EdgeProfile {
        magnitude: 80.0,
        density: 0.12,
        max_linearity: 0.7,
    },
    fusion: FusionWeights {
        color: 0.65,
        texture: 0.20,
        edge: 0.15,
    },
};

impl PipelineType {
    /// Tuning table for this pipeline environment.
    pub fn profile(self) -> &'static PipelineProfile {
        match self {
            PipelineType::Subsea => &SUBSEA,
            PipelineType::CrossCountry => &CROSS_COUNTRY,
            PipelineType::General => &GENERAL,
        }
    }
}

/// Linear sensitivity factor: `1.6` at sensitivity 0, `1.0` at 0.5, `0.4` at 1.
///
/// Multiplying a cutoff by this makes it strictly positive and non-increasing
/// in sensitivity.
#[inline]
pub fn cutoff_scale(sensitivity: f32) -> f32 {
    1.6 - 1.2 * sensitivity
}

/// Signed band widening in `[-1, 1]`, zero at sensitivity 0.5.
#[inline]
pub fn widening(sensitivity: f32) -> f32 {
    (sensitivity - 0.5) * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_non_negative() {
        for ty in PipelineType::ALL {
            let w = ty.profile().fusion;
            assert!(w.color >= 0.0 && w.texture >= 0.0 && w.edge >= 0.0);
            assert!(w.total() > 0.0);
        }
    }

    #[test]
    fn subsea_trusts_texture_over_color() {
        let subsea = SUBSEA.fusion;
        let cross = CROSS_COUNTRY.fusion;
        assert!(subsea.texture > subsea.color);
        assert!(subsea.color / subsea.total() < cross.color / cross.total());
    }

    #[test]
    fn bands_are_well_formed() {
        for ty in PipelineType::ALL {
            for band in ty.profile().color_bands {
                assert!(band.hue_low <= band.hue_high, "{ty:?} {band:?}");
                assert!(band.val_min <= band.val_max, "{ty:?} {band:?}");
            }
        }
    }

    #[test]
    fn cutoff_scale_is_positive_and_decreasing() {
        assert!(cutoff_scale(1.0) > 0.0);
        assert!(cutoff_scale(0.0) > cutoff_scale(0.5));
        assert!((cutoff_scale(0.5) - 1.0).abs() < 1e-6);
    }
}
