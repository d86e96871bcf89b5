//! Color signal: pixels whose HSV falls inside a rust band.
use crate::color::{rgb_to_hsv, Hsv, HUE_RANGE};
use crate::detector::profile::{widening, ColorBand};
use crate::image::{ColorImageU8, Mask};

const HUE_SPREAD: f32 = 3.0;
const SAT_SPREAD: f32 = 25.0;
const VAL_SPREAD: f32 = 20.0;

/// Widen (sensitivity > 0.5) or narrow (< 0.5) a band around its table values.
pub fn scale_band(band: &ColorBand, sensitivity: f32) -> ColorBand {
    let k = widening(sensitivity);
    ColorBand {
        hue_low: band.hue_low - HUE_SPREAD * k,
        hue_high: band.hue_high + HUE_SPREAD * k,
        sat_min: (band.sat_min - SAT_SPREAD * k).max(0.0),
        val_min: (band.val_min - VAL_SPREAD * k).max(0.0),
        val_max: band.val_max + VAL_SPREAD * k,
    }
}

/// Circular hue test; `low` may be negative and `high` may exceed the range.
#[inline]
fn hue_in_range(h: f32, low: f32, high: f32) -> bool {
    if low > high {
        return false;
    }
    if high - low >= HUE_RANGE {
        return true;
    }
    if low < 0.0 {
        h >= low + HUE_RANGE || h <= high
    } else if high >= HUE_RANGE {
        h >= low || h <= high - HUE_RANGE
    } else {
        h >= low && h <= high
    }
}

#[inline]
pub fn in_band(hsv: Hsv, band: &ColorBand) -> bool {
    hsv.s >= band.sat_min
        && hsv.v >= band.val_min
        && hsv.v <= band.val_max
        && hue_in_range(hsv.h, band.hue_low, band.hue_high)
}

/// Binary mask of rust-colored pixels. A zero-area image yields an empty mask.
pub fn color_mask(image: &ColorImageU8<'_>, bands: &[ColorBand], sensitivity: f32) -> Mask {
    let scaled: Vec<ColorBand> = bands.iter().map(|b| scale_band(b, sensitivity)).collect();
    let mut mask = Mask::new(image.w, image.h);
    for y in 0..image.h {
        for x in 0..image.w {
            let hsv = rgb_to_hsv(image.get(x, y));
            if scaled.iter().any(|band| in_band(hsv, band)) {
                mask.set(x, y, true);
            }
        }
    }
    mask
}
