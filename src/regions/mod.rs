//! Region extraction and scoring.
pub mod extractor;
pub mod scoring;

pub use extractor::{extract_regions, Extraction, RegionCandidate};
pub use scoring::{
    classify_severity, recommended_action, score_region, score_terms, SeverityRule,
    SEVERITY_TABLE,
};
