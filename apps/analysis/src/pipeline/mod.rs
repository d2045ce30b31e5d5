//! Pipeline orchestration — validate, segment, fan out the extractors,
//! score, assemble.
//!
//! The four mid-level extractors are read-only over the same text and
//! `SectionSet` and run concurrently. Each stage degrades to its documented
//! default on failure; the pipeline as a whole fails only on input
//! validation.

use std::sync::Arc;

use tracing::debug;

use crate::classifier::{ClaudeClassifier, Classifier};
use crate::config::AnalysisConfig;
use crate::errors::AnalysisError;
use crate::extract::{contact, education, experience, sections, skills};
use crate::models::{
    ContactFields, EducationEntry, ExperienceProfile, ExtractionMethod, RawDocument,
    ResumeAnalysis, SectionSet, SkillsProfile,
};
use crate::quality;

/// Shorter inputs fail validation; nothing useful can be extracted.
pub const MIN_TEXT_CHARS: usize = 50;

pub struct AnalysisPipeline {
    config: AnalysisConfig,
    classifier: Option<Arc<dyn Classifier>>,
}

impl AnalysisPipeline {
    /// Builds the pipeline from config. The Anthropic classifier is attached
    /// only when the AI path is enabled and a key is present.
    pub fn new(config: AnalysisConfig) -> Self {
        let classifier: Option<Arc<dyn Classifier>> =
            match (config.ai_enabled, &config.anthropic_api_key) {
                (true, Some(key)) => Some(Arc::new(ClaudeClassifier::new(key.clone()))),
                _ => None,
            };
        Self { config, classifier }
    }

    /// Injects an alternate classifier backend (or a test stub).
    pub fn with_classifier(config: AnalysisConfig, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            config,
            classifier: Some(classifier),
        }
    }

    /// Fully deterministic pipeline: heuristics everywhere.
    pub fn heuristic_only() -> Self {
        Self {
            config: AnalysisConfig::heuristic_only(),
            classifier: None,
        }
    }

    /// Runs one analysis. Returns a complete `ResumeAnalysis` or an input
    /// error — never a partially populated object.
    pub async fn analyze(&self, document: RawDocument) -> Result<ResumeAnalysis, AnalysisError> {
        validate(&document.text)?;

        let text = document.text.as_str();
        let sections = sections::segment(text);
        debug!("segmented {} sections", sections.len());

        let (
            (contact, contact_used_ai),
            (skills_profile, skills_used_ai),
            (experience_profile, experience_used_ai),
            (education_entries, education_used_ai),
        ) = tokio::join!(
            self.contact_stage(text, &sections),
            self.skills_stage(text, &sections),
            self.experience_stage(text, &sections),
            self.education_stage(text, &sections),
        );

        let quality = quality::score(text, &sections, &contact);
        let extraction_method = combine_paths(&[
            contact_used_ai,
            skills_used_ai,
            experience_used_ai,
            education_used_ai,
        ]);

        Ok(ResumeAnalysis {
            text: document.text,
            contact,
            sections,
            skills: skills_profile,
            experience: experience_profile,
            education: education_entries,
            quality,
            parse_source: document.source_format,
            extraction_method,
        })
    }

    /// The classifier, when the AI path is enabled at all.
    fn active_classifier(&self) -> Option<&dyn Classifier> {
        if self.config.ai_enabled {
            self.classifier.as_deref()
        } else {
            None
        }
    }

    /// The classifier for the per-section enhanced passes.
    fn enhancing_classifier(&self) -> Option<&dyn Classifier> {
        if self.config.enhanced {
            self.active_classifier()
        } else {
            None
        }
    }

    async fn contact_stage(&self, text: &str, sections: &SectionSet) -> (ContactFields, bool) {
        let base = contact::extract(text, sections);
        match self.enhancing_classifier() {
            Some(classifier) => {
                contact::enhance(base, text, classifier, self.config.ai_timeout).await
            }
            None => (base, false),
        }
    }

    async fn skills_stage(&self, text: &str, sections: &SectionSet) -> (SkillsProfile, bool) {
        skills::categorize(
            text,
            sections,
            self.active_classifier(),
            self.config.ai_timeout,
        )
        .await
    }

    async fn experience_stage(
        &self,
        text: &str,
        sections: &SectionSet,
    ) -> (ExperienceProfile, bool) {
        let base = experience::analyze(text, sections);
        match self.enhancing_classifier() {
            Some(classifier) => {
                experience::enhance(base, text, sections, classifier, self.config.ai_timeout).await
            }
            None => (base, false),
        }
    }

    async fn education_stage(
        &self,
        text: &str,
        sections: &SectionSet,
    ) -> (Vec<EducationEntry>, bool) {
        let base = education::extract(text, sections);
        match self.enhancing_classifier() {
            Some(classifier) => {
                education::enhance(base, text, sections, classifier, self.config.ai_timeout).await
            }
            None => (base, false),
        }
    }
}

fn validate(text: &str) -> Result<(), AnalysisError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyDocument);
    }
    let length = trimmed.chars().count();
    if length < MIN_TEXT_CHARS {
        return Err(AnalysisError::DocumentTooShort {
            length,
            minimum: MIN_TEXT_CHARS,
        });
    }
    Ok(())
}

/// `Ai` when every stage used the model, `Heuristic` when none did.
fn combine_paths(used_ai: &[bool]) -> ExtractionMethod {
    if used_ai.iter().all(|used| *used) {
        ExtractionMethod::Ai
    } else if used_ai.iter().any(|used| *used) {
        ExtractionMethod::Mixed
    } else {
        ExtractionMethod::Heuristic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(validate("   \n  "), Err(AnalysisError::EmptyDocument)));
    }

    #[test]
    fn test_validate_rejects_short() {
        let err = validate("too short").unwrap_err();
        match err {
            AnalysisError::DocumentTooShort { length, minimum } => {
                assert_eq!(length, 9);
                assert_eq!(minimum, MIN_TEXT_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_accepts_minimum() {
        assert!(validate(&"x".repeat(MIN_TEXT_CHARS)).is_ok());
    }

    #[test]
    fn test_combine_paths() {
        assert_eq!(combine_paths(&[true, true]), ExtractionMethod::Ai);
        assert_eq!(combine_paths(&[false, false]), ExtractionMethod::Heuristic);
        assert_eq!(combine_paths(&[true, false]), ExtractionMethod::Mixed);
    }
}
