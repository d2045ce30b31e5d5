//! Skill categorization — AI-assisted with a deterministic dictionary
//! fallback.
//!
//! The AI path is an accuracy booster, never a hard dependency: any call
//! failure, timeout, or unusable response falls through to the dictionary,
//! which always terminates and never errors.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::classifier::{classify_with_timeout, lenient, prompts, Classifier};
use crate::extract::dictionaries::{
    CERTIFICATION_TERMS, SOFT_SKILLS, TECHNICAL_TERMS,
};
use crate::models::profile::push_unique;
use crate::models::{SectionKind, SectionSet, SkillCategory, SkillsProfile, TechnicalSkill};

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Categorizes skills from the skills section (full text as fallback).
/// Returns the profile and whether the AI path produced it.
pub async fn categorize(
    text: &str,
    sections: &SectionSet,
    classifier: Option<&dyn Classifier>,
    timeout: Duration,
) -> (SkillsProfile, bool) {
    let scope = sections.get(SectionKind::Skills).unwrap_or(text);

    if let Some(classifier) = classifier {
        match ai_categorize(scope, classifier, timeout).await {
            Ok(profile) => {
                debug!("skill categorization used the AI path");
                return (profile, true);
            }
            Err(e) => {
                warn!("skill categorization fell back to dictionary: {e}");
            }
        }
    }

    (heuristic_categorize(scope), false)
}

// ────────────────────────────────────────────────────────────────────────────
// AI path
// ────────────────────────────────────────────────────────────────────────────

/// Technical entries may come back as full objects or bare strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AiTechnical {
    Named {
        name: String,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        proficiency: Option<String>,
        #[serde(default)]
        years_of_experience: Option<f64>,
    },
    Bare(String),
}

#[derive(Debug, Default, Deserialize)]
struct AiSkills {
    #[serde(default)]
    technical: Vec<AiTechnical>,
    #[serde(default)]
    soft: Vec<String>,
    #[serde(default)]
    frameworks: Vec<String>,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    certifications: Vec<String>,
}

async fn ai_categorize(
    scope: &str,
    classifier: &dyn Classifier,
    timeout: Duration,
) -> Result<SkillsProfile> {
    let payload = json!({ "skills_text": scope });
    let raw =
        classify_with_timeout(classifier, prompts::TASK_CATEGORIZE_SKILLS, &payload, timeout)
            .await?;
    let parsed: AiSkills = lenient::parse_lenient(&raw)?;

    let profile = convert_ai_skills(parsed);
    if profile.is_empty() {
        // An all-empty response carries no signal; let the dictionary try.
        return Err(anyhow!("model returned no skills"));
    }
    Ok(profile)
}

fn convert_ai_skills(parsed: AiSkills) -> SkillsProfile {
    let mut profile = SkillsProfile::default();

    for entry in parsed.technical {
        let skill = match entry {
            AiTechnical::Named {
                name,
                category,
                proficiency,
                years_of_experience,
            } => TechnicalSkill {
                name,
                category: category
                    .as_deref()
                    .map(SkillCategory::from_label)
                    .unwrap_or(SkillCategory::Other),
                proficiency,
                years_of_experience,
            },
            AiTechnical::Bare(name) => TechnicalSkill::new(name, SkillCategory::Other),
        };
        if !skill.name.trim().is_empty() {
            profile.push_technical(skill);
        }
    }

    for (source, bucket) in [
        (parsed.soft, &mut profile.soft),
        (parsed.frameworks, &mut profile.frameworks),
        (parsed.languages, &mut profile.languages),
        (parsed.tools, &mut profile.tools),
        (parsed.certifications, &mut profile.certifications),
    ] {
        for value in source {
            let value = value.trim();
            if !value.is_empty() {
                push_unique(bucket, value);
            }
        }
    }

    profile
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic path
// ────────────────────────────────────────────────────────────────────────────

/// Dictionary scan: case-insensitive word-boundary presence of each
/// canonical term. Language terms also land in `languages`,
/// frontend/backend/mobile in `frameworks`, and the remaining technical
/// categories in `tools`.
pub fn heuristic_categorize(scope: &str) -> SkillsProfile {
    let haystack = scope.to_lowercase();
    let mut profile = SkillsProfile::default();

    for (category, terms) in TECHNICAL_TERMS {
        for term in *terms {
            if !contains_term(&haystack, term) {
                continue;
            }
            profile.push_technical(TechnicalSkill::new(*term, *category));
            match category {
                SkillCategory::Programming => push_unique(&mut profile.languages, term),
                SkillCategory::Frontend | SkillCategory::Backend | SkillCategory::Mobile => {
                    push_unique(&mut profile.frameworks, term)
                }
                _ => push_unique(&mut profile.tools, term),
            }
        }
    }

    for term in SOFT_SKILLS {
        if contains_term(&haystack, term) {
            push_unique(&mut profile.soft, term);
        }
    }

    for term in CERTIFICATION_TERMS {
        if contains_term(&haystack, term) {
            push_unique(&mut profile.certifications, term);
        }
    }

    profile
}

/// Word-boundary substring check over a lowercased haystack. Boundaries are
/// non-alphanumeric so terms like "C++" and ".NET" still match.
fn contains_term(haystack: &str, term: &str) -> bool {
    let needle = term.to_lowercase();
    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find(&needle) {
        let start = search_from + pos;
        let end = start + needle.len();
        let before_ok = start == 0
            || !haystack[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
        let after_ok = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(char::is_alphanumeric);
        if before_ok && after_ok {
            return true;
        }
        search_from = start + needle.len().max(1);
    }
    false
}
