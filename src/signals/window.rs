//! Sliding-window geometry and summed-area tables shared by the texture and
//! edge signals.
use serde::Serialize;

/// Shorter image side is divided by this to get the window size.
pub const WINDOW_DIVISOR: usize = 24;
/// Smallest window side in pixels (odd).
pub const MIN_WINDOW_SIZE: usize = 7;

/// Square analysis window, `2 * radius + 1` pixels on a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub radius: usize,
}

impl Window {
    /// Window scaled to the image resolution.
    pub fn for_image(w: usize, h: usize) -> Self {
        let size = (w.min(h) / WINDOW_DIVISOR).max(MIN_WINDOW_SIZE) | 1;
        Self { radius: size / 2 }
    }

    #[inline]
    pub fn size(&self) -> usize {
        2 * self.radius + 1
    }

    /// Clamped inclusive-exclusive span `[lo, hi)` around `c` on an axis of length `n`.
    #[inline]
    pub fn span(&self, c: usize, n: usize) -> (usize, usize) {
        (c.saturating_sub(self.radius), (c + self.radius + 1).min(n))
    }
}

/// Summed-area table over a `w × h` grid, stored with a zero guard row/column.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    w: usize,
    h: usize,
    sums: Vec<f64>,
}

impl IntegralImage {
    /// Build from per-pixel values produced by `value(x, y)`.
    pub fn from_fn(w: usize, h: usize, mut value: impl FnMut(usize, usize) -> f64) -> Self {
        let stride = w + 1;
        let mut sums = vec![0.0f64; stride * (h + 1)];
        for y in 0..h {
            let mut row_acc = 0.0f64;
            for x in 0..w {
                row_acc += value(x, y);
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_acc;
            }
        }
        Self { w, h, sums }
    }

    /// Sum over `[x0, x1) × [y0, y1)`.
    #[inline]
    pub fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        debug_assert!(x0 <= x1 && x1 <= self.w && y0 <= y1 && y1 <= self.h);
        let stride = self.w + 1;
        self.sums[y1 * stride + x1] - self.sums[y0 * stride + x1] - self.sums[y1 * stride + x0]
            + self.sums[y0 * stride + x0]
    }

    /// Sum and pixel count of the window centred on (x, y), clipped to the grid.
    #[inline]
    pub fn window_sum(&self, window: Window, x: usize, y: usize) -> (f64, usize) {
        let (x0, x1) = window.span(x, self.w);
        let (y0, y1) = window.span(y, self.h);
        (self.rect_sum(x0, y0, x1, y1), (x1 - x0) * (y1 - y0))
    }
}
