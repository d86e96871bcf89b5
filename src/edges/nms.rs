//! Non‑maximum suppression on gradient magnitude with direction alignment.
//!
//! For each pixel, responses smaller than either of their two neighbors along
//! the quantized gradient direction are zeroed. Ties are kept, so a plateau
//! two pixels wide leaves a two-pixel ridge; surviving pixels carry their
//! magnitude. The result does not
//! depend on any magnitude threshold, so callers can threshold the thinned map
//! at several levels and get nested edge sets.
//!
//! The outermost 1‑pixel frame is always suppressed to avoid out‑of‑bounds
//! neighbor lookups.
use crate::edges::grad::Grad;
use crate::image::{ImageF32, ImageView, ImageViewMut};

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Thin `grad.mag` to its directional local maxima.
pub fn suppress_non_maxima(grad: &Grad) -> ImageF32 {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut thin = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return thin;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let out = thin.row_mut(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= 0.0 {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x - 1], mag_next[x + 1])
                } else {
                    (mag_prev[x + 1], mag_next[x - 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            // Ties keep the pixel so plateaus (two-pixel-wide steps) still
            // produce a ridge.
            if mag < neighbor1 || mag < neighbor2 {
                continue;
            }
            out[x] = mag;
        }
    }

    thin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::sobel_gradients;

    #[test]
    fn step_edge_is_thinned_to_a_narrow_ridge() {
        let mut img = ImageF32::new(16, 8);
        for y in 0..8 {
            for x in 8..16 {
                img.set(x, y, 200.0);
            }
        }
        let thin = suppress_non_maxima(&sobel_gradients(&img));
        for y in 1..7 {
            let kept: Vec<usize> = (0..16).filter(|&x| thin.get(x, y) > 0.0).collect();
            assert!(
                !kept.is_empty() && kept.len() <= 2,
                "row {y} kept columns {kept:?}"
            );
            assert!(kept.iter().all(|&x| x == 7 || x == 8));
        }
    }

    #[test]
    fn flat_image_has_no_ridges() {
        let mut img = ImageF32::new(10, 10);
        img.data.iter_mut().for_each(|v| *v = 77.0);
        let thin = suppress_non_maxima(&sobel_gradients(&img));
        assert!(thin.data.iter().all(|&v| v == 0.0));
    }
}
