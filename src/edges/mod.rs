//! Edge processing utilities: image gradients and non‑maximum suppression.
//!
//! - Sobel gradients returning `gx`, `gy` and magnitude.
//! - Threshold-free non‑maximum suppression producing a thinned magnitude map
//!   that the edge signal thresholds per sensitivity.
//!
//! Borders are handled by clamping indices (replicate).

pub mod grad;
pub mod nms;

/// Per‑pixel gradients with magnitude.
pub use grad::{sobel_gradients, Grad};
/// Thinned gradient magnitude.
pub use nms::suppress_non_maxima;
