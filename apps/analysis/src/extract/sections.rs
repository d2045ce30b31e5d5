//! Section segmentation — splits raw resume text into labeled sections by
//! header-pattern matching. Best effort, no failure mode: unrecognizable
//! input yields an empty `SectionSet` and downstream extractors operate on
//! the full text instead.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{SectionKind, SectionSet};

/// Lines at or above this length are body text, never headers.
const MAX_HEADER_LEN: usize = 50;

/// Ordered header patterns. The first match wins and a line can start only
/// one section.
static HEADER_PATTERNS: Lazy<Vec<(SectionKind, Regex)>> = Lazy::new(|| {
    vec![
        (
            SectionKind::Summary,
            Regex::new(r"(?i)^(professional\s+)?(summary|profile|objective)\b").unwrap(),
        ),
        (
            SectionKind::Experience,
            Regex::new(r"(?i)^(work\s+|professional\s+|employment\s+)?(experience|employment|work\s+history)\b")
                .unwrap(),
        ),
        (
            SectionKind::Education,
            Regex::new(r"(?i)^(education|academic)\b").unwrap(),
        ),
        (
            SectionKind::Skills,
            Regex::new(r"(?i)^(technical\s+|core\s+)?(skills|competencies)\b").unwrap(),
        ),
        (
            SectionKind::Projects,
            Regex::new(r"(?i)^(personal\s+)?(projects|portfolio)\b").unwrap(),
        ),
        (
            SectionKind::Achievements,
            Regex::new(r"(?i)^(achievements|awards|accomplishments)\b").unwrap(),
        ),
        (
            SectionKind::Certifications,
            Regex::new(r"(?i)^(certifications?|licenses?)\b").unwrap(),
        ),
    ]
});

/// Scans line by line, starting a new section at each header match and
/// accumulating every following line into the current section's buffer.
/// Lines before the first header are discarded from section content.
pub fn segment(text: &str) -> SectionSet {
    let mut set = SectionSet::default();
    let mut current: Option<SectionKind> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(kind) = match_header(line) {
            flush(&mut set, current.take(), &mut buffer);
            current = Some(kind);
        } else if current.is_some() {
            buffer.push(line);
        }
    }
    flush(&mut set, current.take(), &mut buffer);

    set
}

fn match_header(line: &str) -> Option<SectionKind> {
    let candidate = line.trim();
    if candidate.is_empty() || candidate.chars().count() >= MAX_HEADER_LEN {
        return None;
    }
    HEADER_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(candidate))
        .map(|(kind, _)| *kind)
}

fn flush(set: &mut SectionSet, kind: Option<SectionKind>, buffer: &mut Vec<&str>) {
    if let Some(kind) = kind {
        let text = buffer.join("\n").trim().to_string();
        if !text.is_empty() {
            set.insert(kind, text);
        }
    }
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\njane@x.com\n\nSUMMARY\nSeasoned engineer.\n\nEXPERIENCE\nEngineer at Acme Corp 2019-2022\nBuilt things.\n\nEDUCATION\nB.S. Computer Science, MIT, 2018\n\nSKILLS\nRust, SQL, Leadership\n";

    #[test]
    fn test_detects_all_headed_sections() {
        let sections = segment(SAMPLE);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections.get(SectionKind::Summary), Some("Seasoned engineer."));
        assert!(sections
            .get(SectionKind::Experience)
            .unwrap()
            .contains("Acme Corp"));
        assert!(sections.get(SectionKind::Education).unwrap().contains("MIT"));
        assert_eq!(sections.get(SectionKind::Skills), Some("Rust, SQL, Leadership"));
    }

    #[test]
    fn test_lines_before_first_header_are_discarded() {
        let sections = segment(SAMPLE);
        for section in sections.iter() {
            assert!(!section.text.contains("jane@x.com"));
        }
    }

    #[test]
    fn test_no_headers_yields_empty_set() {
        let text = "Just a paragraph of prose with no recognizable structure at all, \
                    going on and on about nothing in particular.";
        assert!(segment(text).is_empty());
    }

    #[test]
    fn test_long_line_is_not_a_header() {
        // "experience" opens the line, but the line is ≥50 chars of prose.
        let text = "experience shows that long paragraphs like this one are never section headers\nmore prose";
        assert!(segment(text).is_empty());
    }

    #[test]
    fn test_header_variants() {
        let text = "Work History\nAcme\n\nAcademic Background\nMIT\n\nCore Competencies\nRust\n\nAwards\nBest dev\n\nLicenses\nPE\n";
        let sections = segment(text);
        assert!(sections.contains(SectionKind::Experience));
        assert!(sections.contains(SectionKind::Education));
        assert!(sections.contains(SectionKind::Skills));
        assert!(sections.contains(SectionKind::Achievements));
        assert!(sections.contains(SectionKind::Certifications));
    }

    #[test]
    fn test_first_matching_pattern_wins_per_line() {
        // "Summary of Experience" matches the summary pattern first.
        let text = "Summary of Experience\ncontent here\n";
        let sections = segment(text);
        assert!(sections.contains(SectionKind::Summary));
        assert!(!sections.contains(SectionKind::Experience));
    }

    #[test]
    fn test_empty_section_body_is_dropped() {
        let text = "SKILLS\n\nEDUCATION\nMIT\n";
        let sections = segment(text);
        assert!(!sections.contains(SectionKind::Skills));
        assert_eq!(sections.get(SectionKind::Education), Some("MIT"));
    }

    #[test]
    fn test_case_insensitive_headers() {
        let text = "education\nMIT\n";
        assert!(segment(text).contains(SectionKind::Education));
    }

    /// Concatenating detected section contents in detection order must be a
    /// subsequence of the original text — no duplication, no reordering.
    #[test]
    fn test_concatenated_sections_are_subsequence_of_original() {
        for text in [
            SAMPLE,
            "SKILLS\nRust\nSQL\n\nEXPERIENCE\nAcme Corp 2019-2022\n",
            "preamble\nEDUCATION\nMIT\nmore\nSKILLS\nRust\n",
        ] {
            let sections = segment(text);
            let concatenated: String = sections
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("");
            assert!(
                is_subsequence(&concatenated, text),
                "not a subsequence for input: {text:?}"
            );
        }
    }

    fn is_subsequence(needle: &str, haystack: &str) -> bool {
        let mut haystack_chars = haystack.chars();
        needle
            .chars()
            .all(|c| haystack_chars.any(|h| h == c))
    }
}
