use serde::{Deserialize, Serialize};

use crate::models::document::SourceFormat;
use crate::models::profile::{ContactFields, EducationEntry, ExperienceProfile, SkillsProfile};
use crate::models::sections::SectionSet;

/// Composite 0–100 quality score across four independently bounded axes.
/// Invariant: `score == completeness + clarity + relevance + formatting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub score: u8,
    pub completeness: u8,
    pub clarity: u8,
    pub relevance: u8,
    pub formatting: u8,
}

impl QualityMetrics {
    /// Builds the composite from raw subscores. Each axis is clamped to
    /// 0..=25 and the sum to 0..=100, so the invariant holds by construction.
    pub fn from_subscores(completeness: i32, clarity: i32, relevance: i32, formatting: i32) -> Self {
        let completeness = completeness.clamp(0, 25) as u8;
        let clarity = clarity.clamp(0, 25) as u8;
        let relevance = relevance.clamp(0, 25) as u8;
        let formatting = formatting.clamp(0, 25) as u8;
        let score = (completeness + clarity + relevance + formatting).min(100);
        Self {
            score,
            completeness,
            clarity,
            relevance,
            formatting,
        }
    }
}

/// Which strategy produced a `ResumeAnalysis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Ai,
    Heuristic,
    Mixed,
}

/// Root aggregate produced by one pipeline run. Fully populated — degraded
/// stages contribute their documented defaults rather than holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub text: String,
    pub contact: ContactFields,
    pub sections: SectionSet,
    pub skills: SkillsProfile,
    pub experience: ExperienceProfile,
    pub education: Vec<EducationEntry>,
    pub quality: QualityMetrics,
    pub parse_source: SourceFormat,
    pub extraction_method: ExtractionMethod,
}
