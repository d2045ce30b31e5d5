//! Education extraction. Line-based degree matching; institution resolution
//! is a known precision limit, so undetermined institutions keep the
//! `"Unknown"` sentinel rather than being dropped.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::classifier::{classify_with_timeout, lenient, prompts, Classifier};
use crate::extract::dictionaries::DEGREE_FIELDS;
use crate::models::profile::UNKNOWN;
use crate::models::{EducationEntry, SectionKind, SectionSet};

/// Degree level patterns, matched in order. First match labels the line.
static DEGREE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "PhD",
            Regex::new(r"(?i)\b(ph\.?\s?d\.?|doctorate|doctoral)\b").unwrap(),
        ),
        (
            "Master",
            Regex::new(r"(?i)\b(master(?:'s|s)?|m\.?s\.?c?\.?|m\.?a\.|mba|m\.?eng\.?|m\.?tech\.?)\b").unwrap(),
        ),
        (
            "Bachelor",
            Regex::new(r"(?i)\b(bachelor(?:'s|s)?|b\.?s\.?c?\.?|b\.?a\.|b\.?eng\.?|b\.?tech\.?)\b").unwrap(),
        ),
        (
            "Associate",
            Regex::new(r"(?i)\b(associate(?:'s|s)?\s+(?:degree|of)|a\.a\.|a\.s\.)").unwrap(),
        ),
    ]
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static GPA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bgpa[:\s]*([0-4](?:\.\d{1,2})?)\b").unwrap());

static GPA_RATIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-4]\.\d{1,2})\s*/\s*4(?:\.0)?\b").unwrap());

static INSTITUTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?:[A-Z][A-Za-z&.']*\s+)*(?:University|College|Institute|School|Academy)(?:\s+of\s+[A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)*)?)",
    )
    .unwrap()
});

const HONORS_KEYWORDS: &[&str] = &[
    "summa cum laude",
    "magna cum laude",
    "cum laude",
    "dean's list",
    "with honors",
    "with distinction",
    "valedictorian",
];

/// Extracts one entry per degree-keyword line in the education section
/// (full text as fallback).
pub fn extract(text: &str, sections: &SectionSet) -> Vec<EducationEntry> {
    let scope = sections.get(SectionKind::Education).unwrap_or(text);

    scope.lines().filter_map(entry_from_line).collect()
}

fn entry_from_line(line: &str) -> Option<EducationEntry> {
    let line = line.trim();
    let degree = DEGREE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(line))
        .map(|(label, _)| *label)?;

    let years: Vec<&str> = YEAR_RE.find_iter(line).map(|m| m.as_str()).collect();
    let (start_date, end_date) = match years.as_slice() {
        [] => (None, None),
        [only] => (None, Some((*only).to_string())),
        [first, rest @ ..] => (
            Some((*first).to_string()),
            rest.last().map(|y| (*y).to_string()),
        ),
    };

    let institution = INSTITUTION_RE
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let lower = line.to_lowercase();
    let field = DEGREE_FIELDS
        .iter()
        .find(|field| lower.contains(&field.to_lowercase()))
        .map(|field| (*field).to_string());

    let gpa = GPA_RE
        .captures(line)
        .or_else(|| GPA_RATIO_RE.captures(line))
        .and_then(|caps| caps[1].parse::<f64>().ok());

    // "magna cum laude" must not also collect the plain "cum laude" keyword.
    let mut achievements: Vec<String> = Vec::new();
    for keyword in HONORS_KEYWORDS {
        if lower.contains(keyword) && !achievements.iter().any(|a| a.contains(keyword)) {
            achievements.push((*keyword).to_string());
        }
    }

    Some(EducationEntry {
        institution,
        degree: degree.to_string(),
        field,
        start_date,
        end_date,
        gpa,
        achievements,
    })
}

#[derive(Debug, Deserialize)]
struct AiEducation {
    #[serde(default)]
    entries: Vec<AiEducationEntry>,
}

#[derive(Debug, Deserialize)]
struct AiEducationEntry {
    #[serde(default)]
    institution: Option<String>,
    degree: String,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    gpa: Option<f64>,
    #[serde(default)]
    achievements: Vec<String>,
}

/// Enhanced pass: the model may resolve `"Unknown"` institutions on
/// degree-matched entries and contribute entries the line scan missed.
/// Failures keep the heuristic result.
pub async fn enhance(
    mut base: Vec<EducationEntry>,
    text: &str,
    sections: &SectionSet,
    classifier: &dyn Classifier,
    timeout: Duration,
) -> (Vec<EducationEntry>, bool) {
    let scope = sections.get(SectionKind::Education).unwrap_or(text);
    let payload = json!({ "education_text": scope });
    let raw = match classify_with_timeout(
        classifier,
        prompts::TASK_EXTRACT_EDUCATION,
        &payload,
        timeout,
    )
    .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!("education enhancement failed, keeping heuristic result: {e}");
            return (base, false);
        }
    };

    let parsed: AiEducation = match lenient::parse_lenient(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("education enhancement response unusable: {e}");
            return (base, false);
        }
    };

    for entry in parsed.entries {
        if entry.degree.trim().is_empty() {
            continue;
        }
        if let Some(existing) = base
            .iter_mut()
            .find(|e| e.degree.eq_ignore_ascii_case(entry.degree.trim()))
        {
            if existing.institution == UNKNOWN {
                if let Some(institution) = entry.institution.filter(|i| !i.trim().is_empty()) {
                    existing.institution = institution;
                }
            }
            if existing.field.is_none() {
                existing.field = entry.field;
            }
            if existing.gpa.is_none() {
                existing.gpa = entry.gpa;
            }
        } else {
            base.push(EducationEntry {
                institution: entry
                    .institution
                    .filter(|i| !i.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                degree: entry.degree.trim().to_string(),
                field: entry.field,
                start_date: entry.start_date,
                end_date: entry.end_date,
                gpa: entry.gpa,
                achievements: entry.achievements,
            });
        }
    }

    (base, true)
}
