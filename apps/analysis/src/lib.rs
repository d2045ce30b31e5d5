//! Resume analysis pipeline.
//!
//! Turns converted resume text into a structured [`ResumeAnalysis`]:
//! section segmentation, contact-field extraction, skill categorization
//! (AI-assisted, heuristic fallback), experience and education analysis,
//! and a composite quality score. Heuristics-first: the model is an
//! optional accuracy booster, never a hard dependency.

pub mod classifier;
pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod quality;

pub use config::AnalysisConfig;
pub use errors::AnalysisError;
pub use models::{ExtractionMethod, RawDocument, ResumeAnalysis};
pub use pipeline::AnalysisPipeline;
