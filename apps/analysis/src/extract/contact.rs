//! Contact-field extraction. Deterministic regex-only — this data is cheap
//! and precision-sensitive, so the heuristic path never consults a model;
//! the optional enhanced pass only fills fields the patterns missed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use std::time::Duration;

use crate::classifier::{classify_with_timeout, lenient, prompts, Classifier};
use crate::models::{ConfidentField, ContactFields, SectionKind, SectionSet};

/// Contact details live at the top of the document.
const CONTACT_WINDOW_CHARS: usize = 500;
/// How many leading lines are scanned for a name/location.
const TOP_LINES: usize = 8;

const CONF_EMAIL: f64 = 0.95;
const CONF_PHONE: f64 = 0.9;
const CONF_URL: f64 = 0.9;
const CONF_SUMMARY: f64 = 0.9;
const CONF_LOCATION: f64 = 0.8;
const CONF_NAME: f64 = 0.75;
/// Fixed default for fields inferred by the model rather than a pattern.
const CONF_AI: f64 = 0.7;

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_CANDIDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().\-]{5,}\d").unwrap());

/// Year ranges ("2019-2022") look like phone digit runs; skip them.
static YEAR_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?(19|20)\d{2}\)?\s*[-–—]\s*\(?(19|20)\d{2}\)?$").unwrap());

static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[A-Za-z0-9_-]+").unwrap());

static GITHUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)github\.com/[A-Za-z0-9_-]+").unwrap());

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bhttps?://[^\s]+").unwrap());

static LOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z .'-]+,\s*[A-Za-z .]{2,}$").unwrap());

/// Extracts contact fields from the first ~500 characters of the document.
/// Absent fields are omitted, not reported at zero confidence.
pub fn extract(text: &str, sections: &SectionSet) -> ContactFields {
    let window = contact_window(text);
    let mut contact = ContactFields::default();

    if let Some(m) = EMAIL_RE.find(window) {
        contact.email = Some(ConfidentField::new(m.as_str(), CONF_EMAIL));
    }

    if let Some(digits) = find_phone(window) {
        contact.phone = Some(ConfidentField::new(digits, CONF_PHONE));
    }

    if let Some(m) = LINKEDIN_RE.find(window) {
        contact.linkedin = Some(ConfidentField::new(m.as_str(), CONF_URL));
    }
    if let Some(m) = GITHUB_RE.find(window) {
        contact.github = Some(ConfidentField::new(m.as_str(), CONF_URL));
    }
    if let Some(url) = find_website(window) {
        contact.website = Some(ConfidentField::new(url, CONF_URL));
    }

    if let Some(name) = find_name(window) {
        contact.name = Some(ConfidentField::new(name, CONF_NAME));
    }
    if let Some(location) = find_location(window) {
        contact.location = Some(ConfidentField::new(location, CONF_LOCATION));
    }

    if let Some(summary) = sections.get(SectionKind::Summary) {
        contact.summary = Some(ConfidentField::new(summary, CONF_SUMMARY));
    }

    contact
}

/// First ~500 characters on a char boundary.
fn contact_window(text: &str) -> &str {
    match text.char_indices().nth(CONTACT_WINDOW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// First candidate digit run that normalizes to 7–15 digits and isn't a
/// year range. Returned digit-normalized.
fn find_phone(window: &str) -> Option<String> {
    for candidate in PHONE_CANDIDATE_RE.find_iter(window) {
        if YEAR_RANGE_RE.is_match(candidate.as_str().trim()) {
            continue;
        }
        let digits: String = candidate
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
            return Some(digits);
        }
    }
    None
}

/// Name inference is a not-a-pattern heuristic: a short top-of-document line
/// of 2–4 capitalized words with no digits or address-like characters.
fn find_name(window: &str) -> Option<String> {
    for line in window.lines().take(TOP_LINES) {
        let line = line.trim();
        if line.is_empty() || line.len() >= 60 {
            continue;
        }
        if line.contains('@') || line.contains("://") || line.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) {
            continue;
        }
        if words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        {
            return Some(line.to_string());
        }
    }
    None
}

fn find_location(window: &str) -> Option<String> {
    window
        .lines()
        .take(TOP_LINES)
        .map(str::trim)
        .find(|line| {
            LOCATION_RE.is_match(line) && !line.contains('@') && !EMAIL_RE.is_match(line)
        })
        .map(str::to_string)
}

/// A generic URL that isn't the LinkedIn or GitHub profile.
fn find_website(window: &str) -> Option<String> {
    URL_RE
        .find_iter(window)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')']))
        .find(|url| {
            let lower = url.to_lowercase();
            !lower.contains("linkedin.com") && !lower.contains("github.com")
        })
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct AiContact {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    linkedin: Option<String>,
    #[serde(default)]
    github: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

/// Enhanced pass: one model call that may fill fields the patterns missed.
/// Pattern-matched fields are never overwritten, and any failure leaves the
/// heuristic result untouched.
pub async fn enhance(
    mut base: ContactFields,
    text: &str,
    classifier: &dyn Classifier,
    timeout: Duration,
) -> (ContactFields, bool) {
    let payload = json!({ "contact_text": contact_window(text) });
    let raw = match classify_with_timeout(classifier, prompts::TASK_EXTRACT_CONTACT, &payload, timeout).await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!("contact enhancement failed, keeping heuristic result: {e}");
            return (base, false);
        }
    };

    let parsed: AiContact = match lenient::parse_lenient(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("contact enhancement response unusable: {e}");
            return (base, false);
        }
    };

    fill_if_absent(&mut base.name, parsed.name);
    fill_if_absent(&mut base.email, parsed.email);
    fill_if_absent(&mut base.phone, parsed.phone.map(normalize_phone_digits));
    fill_if_absent(&mut base.location, parsed.location);
    fill_if_absent(&mut base.linkedin, parsed.linkedin);
    fill_if_absent(&mut base.github, parsed.github);
    fill_if_absent(&mut base.website, parsed.website);
    fill_if_absent(&mut base.summary, parsed.summary);

    (base, true)
}

fn fill_if_absent(slot: &mut Option<ConfidentField>, value: Option<String>) {
    if slot.is_none() {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            *slot = Some(ConfidentField::new(value.trim(), CONF_AI));
        }
    }
}

fn normalize_phone_digits(raw: String) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        digits
    } else {
        raw
    }
}
