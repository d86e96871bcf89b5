//! Owned binary mask, one byte per pixel.
//!
//! Set pixels hold [`Mask::ON`] (255) so a mask can be written straight to an
//! 8-bit grayscale file; anything non-zero reads as set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl Mask {
    pub const ON: u8 = 255;
    pub const OFF: u8 = 0;

    /// All-clear mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![Self::OFF; w * h],
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if f(x, y) {
                    mask.data[y * w + x] = Self::ON;
                }
            }
        }
        mask
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != 0
    }

    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        self.data[idx] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let i = self.idx(x, y);
        self.data[i] = if on { Self::ON } else { Self::OFF };
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Fraction of set pixels in `[0, 1]`; `0.0` for an empty mask.
    pub fn coverage(&self) -> f32 {
        if self.data.is_empty() {
            0.0
        } else {
            self.count() as f32 / self.data.len() as f32
        }
    }
}

