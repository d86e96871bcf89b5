//! Edge signal: dense, irregular edges (pitting, flaking).
//!
//! Intensity is lightly blurred, Sobel gradients are thinned by non-maximum
//! suppression, and the thinned ridges above a sensitivity-scaled magnitude
//! are counted per window. Windows dominated by one edge direction (seams,
//! welds, pipe outlines) are suppressed using the coherence of the doubled
//! orientation angles, `|Σ (cos 2θ, sin 2θ)| / n`, which is 1 for parallel
//! edges and near 0 for scattered ones. Coherence is measured on a fixed
//! reference edge set so the mask only grows with sensitivity.
use super::window::{IntegralImage, Window};
use crate::detector::profile::{cutoff_scale, EdgeProfile};
use crate::edges::{sobel_gradients, suppress_non_maxima, Grad};
use crate::filters::{apply as apply_filter, GAUSSIAN_3TAP};
use crate::image::{ImageF32, Mask};

/// Sensitivity at which the reference edge set for coherence is taken.
const REFERENCE_SENSITIVITY: f32 = 1.0;

/// Gradients and thinned ridges computed once per image.
pub struct EdgeField {
    pub grad: Grad,
    pub thin: ImageF32,
}

impl EdgeField {
    pub fn from_intensity(gray: &ImageF32) -> Self {
        let smoothed = apply_filter(&GAUSSIAN_3TAP, gray);
        let grad = sobel_gradients(&smoothed);
        let thin = suppress_non_maxima(&grad);
        Self { grad, thin }
    }

    #[inline]
    fn is_edge(&self, idx: usize, magnitude: f32) -> bool {
        self.thin.data[idx] >= magnitude && self.thin.data[idx] > 0.0
    }
}

/// `(magnitude, density)` cutoffs for the given sensitivity.
pub fn edge_thresholds(profile: &EdgeProfile, sensitivity: f32) -> (f32, f32) {
    let scale = cutoff_scale(sensitivity);
    (profile.magnitude * scale, profile.density * scale)
}

/// Binary mask of windows with high, non-linear edge density.
pub fn edge_mask(field: &EdgeField, window: Window, profile: &EdgeProfile, sensitivity: f32) -> Mask {
    let (w, h) = (field.thin.w, field.thin.h);
    if w == 0 || h == 0 {
        return Mask::new(w, h);
    }
    let (magnitude, density) = edge_thresholds(profile, sensitivity);
    let (reference_magnitude, _) = edge_thresholds(profile, REFERENCE_SENSITIVITY);

    let edges = IntegralImage::from_fn(w, h, |x, y| {
        field.is_edge(y * w + x, magnitude) as u8 as f64
    });
    let reference = IntegralImage::from_fn(w, h, |x, y| {
        field.is_edge(y * w + x, reference_magnitude) as u8 as f64
    });
    let (cos2, sin2) = doubled_angle_sums(field, reference_magnitude);

    Mask::from_fn(w, h, |x, y| {
        let (count, n) = edges.window_sum(window, x, y);
        if count <= 0.0 || count / (n as f64) < density as f64 {
            return false;
        }
        let (ref_count, _) = reference.window_sum(window, x, y);
        if ref_count <= 0.0 {
            return true;
        }
        let (c, _) = cos2.window_sum(window, x, y);
        let (s, _) = sin2.window_sum(window, x, y);
        let linearity = (c * c + s * s).sqrt() / ref_count;
        linearity <= profile.max_linearity as f64
    })
}

fn doubled_angle_sums(field: &EdgeField, magnitude: f32) -> (IntegralImage, IntegralImage) {
    let (w, h) = (field.thin.w, field.thin.h);
    let unit = |x: usize, y: usize| -> Option<(f64, f64)> {
        let idx = y * w + x;
        if !field.is_edge(idx, magnitude) {
            return None;
        }
        let gx = field.grad.gx.data[idx] as f64;
        let gy = field.grad.gy.data[idx] as f64;
        let m2 = gx * gx + gy * gy;
        (m2 > 0.0).then(|| ((gx * gx - gy * gy) / m2, 2.0 * gx * gy / m2))
    };
    let cos2 = IntegralImage::from_fn(w, h, |x, y| unit(x, y).map_or(0.0, |u| u.0));
    let sin2 = IntegralImage::from_fn(w, h, |x, y| unit(x, y).map_or(0.0, |u| u.1));
    (cos2, sin2)
}
