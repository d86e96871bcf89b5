//! Weighted vote over the three signal masks.
use crate::detector::profile::FusionWeights;
use crate::image::Mask;

/// A pixel is fused-positive when its weighted votes reach this share of the
/// total weight.
pub const FUSION_FRACTION: f32 = 0.4;

/// Absorbs rounding in the weight sums so a vote exactly at the cut passes.
const VOTE_EPSILON: f32 = 1e-6;

/// Combine signal masks pixel-wise. All masks must share dimensions.
pub fn fuse(color: &Mask, texture: &Mask, edge: &Mask, weights: &FusionWeights) -> Mask {
    debug_assert!(color.w == texture.w && color.w == edge.w);
    debug_assert!(color.h == texture.h && color.h == edge.h);
    let needed = FUSION_FRACTION * weights.total() - VOTE_EPSILON;
    let mut out = Mask::new(color.w, color.h);
    for (i, v) in out.data.iter_mut().enumerate() {
        let mut score = 0.0f32;
        if color.is_set(i) {
            score += weights.color;
        }
        if texture.is_set(i) {
            score += weights.texture;
        }
        if edge.is_set(i) {
            score += weights.edge;
        }
        if score > 0.0 && score >= needed {
            *v = Mask::ON;
        }
    }
    out
}

/// Per-pixel count of raw signals that fired, `0..=3`.
pub fn agreement_count(color: &Mask, texture: &Mask, edge: &Mask, idx: usize) -> u8 {
    color.is_set(idx) as u8 + texture.is_set(idx) as u8 + edge.is_set(idx) as u8
}
