//! Texture signal: local intensity standard deviation over a sliding window.
//!
//! Pixels whose window would leave the image are never flagged, so the outer
//! `radius`-wide frame of the mask is always clear.
use super::window::{IntegralImage, Window};
use crate::detector::profile::{cutoff_scale, TextureProfile};
use crate::image::{ImageF32, Mask};

/// Standard-deviation cutoff for the given sensitivity (intensity units).
pub fn texture_cutoff(profile: &TextureProfile, sensitivity: f32) -> f32 {
    profile.std_cutoff * cutoff_scale(sensitivity)
}

/// Local standard deviation of `gray`; zero inside the border margin.
pub fn local_std(gray: &ImageF32, window: Window) -> ImageF32 {
    let (w, h) = (gray.w, gray.h);
    let mut out = ImageF32::new(w, h);
    let r = window.radius;
    if w <= 2 * r || h <= 2 * r {
        return out;
    }

    let sum = IntegralImage::from_fn(w, h, |x, y| gray.get(x, y) as f64);
    let sum_sq = IntegralImage::from_fn(w, h, |x, y| {
        let v = gray.get(x, y) as f64;
        v * v
    });

    for y in r..h - r {
        for x in r..w - r {
            let (s, n) = sum.window_sum(window, x, y);
            let (s2, _) = sum_sq.window_sum(window, x, y);
            let n = n as f64;
            let mean = s / n;
            let var = (s2 / n - mean * mean).max(0.0);
            out.set(x, y, var.sqrt() as f32);
        }
    }
    out
}

/// Threshold a roughness map. Strictly greater, so flat areas never pass.
pub fn threshold_roughness(roughness: &ImageF32, cutoff: f32) -> Mask {
    Mask::from_fn(roughness.w, roughness.h, |x, y| roughness.get(x, y) > cutoff)
}

/// Binary mask of rough, non-uniform surface.
pub fn texture_mask(
    gray: &ImageF32,
    window: Window,
    profile: &TextureProfile,
    sensitivity: f32,
) -> Mask {
    let roughness = local_std(gray, window);
    threshold_roughness(&roughness, texture_cutoff(profile, sensitivity))
}
