//! Resume quality scoring.
//!
//! A pure function over `(text, sections, contact)`. The formula is simple
//! and auditable on purpose; downstream ranking depends on reproducing it
//! exactly, including clamp and penalty ordering.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::dictionaries::TECH_RELEVANCE_KEYWORDS;
use crate::models::{ContactFields, QualityMetrics, SectionKind, SectionSet};

static YEAR_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

pub fn score(text: &str, sections: &SectionSet, contact: &ContactFields) -> QualityMetrics {
    let word_count = text.split_whitespace().count();
    QualityMetrics::from_subscores(
        completeness(sections, contact),
        clarity(text, word_count),
        relevance(text),
        formatting(text, sections),
    )
}

/// +5 each for name, email, phone, an experience section, and
/// (education OR skills section).
fn completeness(sections: &SectionSet, contact: &ContactFields) -> i32 {
    let mut points = 0;
    if contact.name.is_some() {
        points += 5;
    }
    if contact.email.is_some() {
        points += 5;
    }
    if contact.phone.is_some() {
        points += 5;
    }
    if sections.contains(SectionKind::Experience) {
        points += 5;
    }
    if sections.contains(SectionKind::Education) || sections.contains(SectionKind::Skills) {
        points += 5;
    }
    points
}

/// Word-count tiers, then penalties, then the clamp.
fn clarity(text: &str, word_count: usize) -> i32 {
    let mut points = 0;
    if word_count > 100 {
        points += 10;
    }
    if word_count > 300 {
        points += 10;
    }
    if text.contains('\n') {
        points += 5;
    }
    if word_count < 80 {
        points -= 5;
    }
    if word_count > 1200 {
        points -= 10;
    }
    points
}

/// `min(25, 8 × matched keyword count)`.
fn relevance(text: &str) -> i32 {
    let lower = text.to_lowercase();
    let matched = TECH_RELEVANCE_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count() as i32;
    (8 * matched).min(25)
}

fn formatting(text: &str, sections: &SectionSet) -> i32 {
    let mut points = 0;
    if sections.contains(SectionKind::Summary) {
        points += 5;
    }
    if sections.len() >= 3 {
        points += 10;
    }
    if YEAR_TOKEN_RE.is_match(text) {
        points += 5;
    }
    if text.contains('@') {
        points += 5;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfidentField;

    fn full_contact() -> ContactFields {
        ContactFields {
            name: Some(ConfidentField::new("Jane Doe", 0.75)),
            email: Some(ConfidentField::new("jane@x.com", 0.95)),
            phone: Some(ConfidentField::new("14155550100", 0.9)),
            ..ContactFields::default()
        }
    }

    fn sections_with(kinds: &[SectionKind]) -> SectionSet {
        let mut sections = SectionSet::default();
        for kind in kinds {
            sections.insert(*kind, "content".to_string());
        }
        sections
    }

    #[test]
    fn test_completeness_full() {
        let sections = sections_with(&[SectionKind::Experience, SectionKind::Skills]);
        assert_eq!(completeness(&sections, &full_contact()), 25);
    }

    #[test]
    fn test_completeness_education_or_skills_counts_once() {
        let sections = sections_with(&[SectionKind::Education, SectionKind::Skills]);
        assert_eq!(completeness(&sections, &ContactFields::default()), 5);
    }

    #[test]
    fn test_clarity_tiers() {
        let text_150 = "word ".repeat(150);
        assert_eq!(clarity(&text_150, 150), 10);
        let text_400 = "word ".repeat(400);
        assert_eq!(clarity(&text_400, 400), 20);
    }

    #[test]
    fn test_clarity_newline_bonus() {
        assert_eq!(clarity("a\nb", 150), 15);
    }

    #[test]
    fn test_clarity_short_text_penalty_clamps_at_zero() {
        // 50 words: no tier bonus, −5 penalty → clamped to 0 by the caller.
        let q = QualityMetrics::from_subscores(0, clarity("fifty words", 50), 0, 0);
        assert_eq!(q.clarity, 0);
    }

    #[test]
    fn test_clarity_very_long_text_penalty() {
        // >1200 words: 10 + 10 + 5 − 10 = 15 (with newlines).
        assert_eq!(clarity("a\nb", 1500), 15);
    }

    #[test]
    fn test_relevance_caps_at_25() {
        assert_eq!(relevance("developer engineer programming software"), 25);
        assert_eq!(relevance("developer and engineer"), 16);
        assert_eq!(relevance("florist"), 0);
    }

    #[test]
    fn test_formatting_all_signals() {
        let sections = sections_with(&[
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Skills,
        ]);
        assert_eq!(formatting("worked 2019 at jane@x.com", &sections), 25);
    }

    #[test]
    fn test_formatting_no_signals() {
        assert_eq!(formatting("plain prose", &SectionSet::default()), 0);
    }

    #[test]
    fn test_score_invariant_holds() {
        let sections = sections_with(&[SectionKind::Summary, SectionKind::Experience]);
        let text = format!("software developer {}", "word ".repeat(320));
        let q = score(&text, &sections, &full_contact());
        assert_eq!(
            q.score,
            q.completeness + q.clarity + q.relevance + q.formatting
        );
        assert!(q.score <= 100);
    }

    #[test]
    fn test_fifty_word_no_contact_boundary() {
        // Boundary case: low but non-negative completeness, clarity
        // absorbs the short-text penalty via clamp-at-zero.
        let text = "word ".repeat(50);
        let q = score(&text, &SectionSet::default(), &ContactFields::default());
        assert_eq!(q.completeness, 0);
        assert_eq!(q.clarity, 0);
        assert_eq!(q.score, q.relevance + q.formatting);
    }
}
