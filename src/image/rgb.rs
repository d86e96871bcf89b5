use serde::Serialize;

/// Borrowed 8-bit interleaved color view (RGB or RGBA).
///
/// `stride` is the number of bytes between the starts of consecutive rows and
/// must be at least `w * channels`. Alpha, when present, is ignored.
#[derive(Clone, Copy, Debug)]
pub struct ColorImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub channels: usize,
    pub data: &'a [u8],
}

/// Reason an input image cannot be processed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum InputIssue {
    ZeroArea { width: usize, height: usize },
    UnsupportedChannels { channels: usize },
    BufferTooShort { expected: usize, actual: usize },
    /// Row or buffer size does not fit in `usize`.
    SizeOverflow {
        width: usize,
        height: usize,
        stride: usize,
        channels: usize,
    },
}

impl std::fmt::Display for InputIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroArea { width, height } => {
                write!(f, "image has zero area ({width}x{height})")
            }
            Self::UnsupportedChannels { channels } => {
                write!(f, "unsupported channel count {channels} (expected 3 or 4)")
            }
            Self::BufferTooShort { expected, actual } => {
                write!(f, "pixel buffer holds {actual} bytes, expected {expected}")
            }
            Self::SizeOverflow {
                width,
                height,
                stride,
                channels,
            } => write!(
                f,
                "buffer size of {width}x{height} (stride {stride}, {channels} channels) overflows"
            ),
        }
    }
}

impl<'a> ColorImageU8<'a> {
    /// Tightly packed RGB view (`stride == 3 * w`).
    pub fn rgb(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w.saturating_mul(3),
            channels: 3,
            data,
        }
    }

    /// Check that the view describes a non-empty RGB(A) grid backed by enough bytes.
    pub fn validate(&self) -> Result<(), InputIssue> {
        if self.w == 0 || self.h == 0 {
            return Err(InputIssue::ZeroArea {
                width: self.w,
                height: self.h,
            });
        }
        if self.channels != 3 && self.channels != 4 {
            return Err(InputIssue::UnsupportedChannels {
                channels: self.channels,
            });
        }
        let overflow = || InputIssue::SizeOverflow {
            width: self.w,
            height: self.h,
            stride: self.stride,
            channels: self.channels,
        };
        let row_bytes = self.w.checked_mul(self.channels).ok_or_else(overflow)?;
        let expected = self
            .stride
            .max(row_bytes)
            .checked_mul(self.h - 1)
            .and_then(|v| v.checked_add(row_bytes))
            .ok_or_else(overflow)?;
        if self.stride < row_bytes || self.data.len() < expected {
            return Err(InputIssue::BufferTooShort {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Interleaved bytes of row `y` (exactly `w * channels` long).
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }

    /// `[r, g, b]` at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + x * self.channels;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}
