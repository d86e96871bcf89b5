//! Color-space helpers: RGB → HSV and RGB → intensity.
//!
//! HSV follows the common 8-bit convention: hue in half-degrees `[0, 180)`,
//! saturation and value in `[0, 255]`. Intensity uses the ITU-R BT.601 luma
//! weights and stays in 8-bit units.
use crate::image::{ColorImageU8, ImageF32, ImageView, ImageViewMut};
use serde::Serialize;

/// Hue range in half-degrees.
pub const HUE_RANGE: f32 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Convert an 8-bit RGB triple to HSV.
#[inline]
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> Hsv {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };
    if delta <= 0.0 {
        return Hsv { h: 0.0, s, v };
    }

    let deg = if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = (deg.rem_euclid(360.0)) * 0.5;
    Hsv { h, s, v }
}

#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Single-channel intensity image in `[0, 255]`.
pub fn intensity_image(image: &ColorImageU8<'_>) -> ImageF32 {
    let mut out = ImageF32::new(image.w, image.h);
    for y in 0..image.h {
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            *px = luma(image.get(x, y));
        }
    }
    out
}

/// Global brightness statistics of the intensity image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub mean_intensity: f32,
    pub std_intensity: f32,
    pub min_intensity: f32,
    pub max_intensity: f32,
    /// Coefficient of variation (`std / mean`), `0` for a black image.
    pub contrast: f32,
}

impl ImageStats {
    pub fn from_intensity(gray: &ImageF32) -> Self {
        let n = gray.area();
        if n == 0 {
            return Self::default();
        }
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for row in gray.rows() {
            for &v in row {
                sum += v as f64;
                sum_sq += (v as f64) * (v as f64);
                min = min.min(v);
                max = max.max(v);
            }
        }
        let mean = sum / n as f64;
        let var = (sum_sq / n as f64 - mean * mean).max(0.0);
        let std = var.sqrt();
        Self {
            mean_intensity: mean as f32,
            std_intensity: std as f32,
            min_intensity: min,
            max_intensity: max,
            contrast: if mean > 0.0 { (std / mean) as f32 } else { 0.0 },
        }
    }
}
