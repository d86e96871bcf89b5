//! Corrosion detector: one engine parameterised by a per-environment table.
//!
//! Overview
//! - Three independent signals are computed from the same RGB input: a color
//!   mask of rust-like HSV bands, a texture mask of high local intensity
//!   deviation, and an edge mask of dense, non-linear edges.
//! - The masks are fused by a weighted vote, cleaned by a morphological
//!   opening then closing, and split into 8-connected components.
//! - Components above the minimum area are scored for confidence and
//!   classified by severity; the assembler sorts them and adds an
//!   image-level summary.
//!
//! Modules
//! - [`params`] – validated configuration and the pipeline type enum.
//! - [`profile`] – per-type tuning tables, immutable statics.
//! - `pipeline` – the [`CorrosionDetector`] implementation.
//! - [`reporting`] – result ordering and summary statistics.

pub mod params;
mod pipeline;
pub mod profile;
pub mod reporting;

pub use params::{DetectionConfig, PipelineType, DEFAULT_MIN_AREA_PX, DEFAULT_SENSITIVITY};
pub use pipeline::{detect_corrosion, CorrosionDetector};
pub use profile::PipelineProfile;
