//! Pixel containers shared by every pipeline stage.
//!
//! - [`ColorImageU8`]: borrowed 8-bit RGB/RGBA view handed in by the caller.
//! - [`ImageF32`]: owned single-channel float buffer (intensity, roughness).
//! - [`Mask`]: owned binary mask, one byte per pixel (0 or 255).
//!
//! `io` lives on the caller side of the engine boundary and is the only place
//! that touches the file system.
pub mod f32;
pub mod io;
pub mod mask;
pub mod rgb;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::mask::Mask;
pub use self::rgb::{ColorImageU8, InputIssue};
pub use self::traits::{ImageView, ImageViewMut, Rows};
