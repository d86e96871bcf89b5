//! Per-pixel corrosion signals: color, texture and edge masks, and their fusion.
//!
//! Each extractor is a pure function of the image, the pipeline profile and
//! the sensitivity. For every extractor the mask at a higher sensitivity is a
//! superset of the mask at a lower one.
pub mod color;
pub mod edge;
pub mod fusion;
pub mod texture;
pub mod window;

pub use color::color_mask;
pub use edge::{edge_mask, EdgeField};
pub use fusion::{fuse, FUSION_FRACTION};
pub use texture::{local_std, texture_mask};
pub use window::{IntegralImage, Window};

use crate::detector::profile::PipelineProfile;
use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::image::{ColorImageU8, ImageF32, Mask};
use std::time::Instant;

/// Raw outputs of the three extractors, all at input resolution.
#[derive(Clone, Debug)]
pub struct SignalMasks {
    pub color: Mask,
    pub texture: Mask,
    pub edge: Mask,
}

impl SignalMasks {
    /// Number of signals that fired at pixel index `idx`.
    #[inline]
    pub fn agreement(&self, idx: usize) -> u8 {
        fusion::agreement_count(&self.color, &self.texture, &self.edge, idx)
    }

    pub fn fuse(&self, profile: &PipelineProfile) -> Mask {
        fuse(&self.color, &self.texture, &self.edge, &profile.fusion)
    }
}

/// Run all three extractors, recording one `color`, `texture` and `edge`
/// timing each. `gray` is the intensity of `image`.
pub fn extract_signals(
    image: &ColorImageU8<'_>,
    gray: &ImageF32,
    window: Window,
    profile: &PipelineProfile,
    sensitivity: f32,
    timings: &mut TimingBreakdown,
) -> SignalMasks {
    let stage = Instant::now();
    let color = color_mask(image, profile.color_bands, sensitivity);
    timings.push("color", elapsed_ms(stage));

    let stage = Instant::now();
    let texture = texture_mask(gray, window, &profile.texture, sensitivity);
    timings.push("texture", elapsed_ms(stage));

    let stage = Instant::now();
    let field = EdgeField::from_intensity(gray);
    let edge = edge_mask(&field, window, &profile.edge, sensitivity);
    timings.push("edge", elapsed_ms(stage));

    SignalMasks {
        color,
        texture,
        edge,
    }
}
