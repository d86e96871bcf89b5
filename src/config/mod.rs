//! JSON configuration for the command-line tools.
pub mod scan;

pub use scan::{load_config, ResizeConfig, ScanOutputConfig, ScanToolConfig};
