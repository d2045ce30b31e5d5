//! Work-experience analysis: date-range tenure, role/company mentions, and
//! industry tagging.
//!
//! Tenure is a sum over matched ranges — overlapping roles double-count.
//! That inflation is a documented approximation downstream scoring relies
//! on; do not "fix" it here without product sign-off.

use std::time::Duration;

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::classifier::{classify_with_timeout, lenient, prompts, Classifier};
use crate::extract::dictionaries::{INDUSTRY_KEYWORDS, ORG_SUFFIXES, ROLE_KEYWORDS};
use crate::models::profile::UNKNOWN;
use crate::models::{ExperienceProfile, Role, SectionKind, SectionSet};

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:[-–—]|to)\s*((?:19|20)\d{2}|present|current)\b")
        .unwrap()
});

/// A run of capitalized words ending in an organizational suffix.
static COMPANY_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?:[A-Z][A-Za-z0-9&.']*\s+)+(?:Corp(?:oration)?|Inc(?:orporated)?|Ltd|LLC|Company|Technologies|Systems|Solutions)\b\.?)",
    )
    .unwrap()
});

static ROLE_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b((?:[A-Za-z]+\s+){{0,3}}(?:{}))\b",
        ROLE_KEYWORDS.join("|")
    ))
    .unwrap()
});

/// Analyzes the experience section (full text as fallback). Industry tags
/// are matched against the full text regardless of sectioning.
pub fn analyze(text: &str, sections: &SectionSet) -> ExperienceProfile {
    analyze_with_year(text, sections, Utc::now().year())
}

/// `current_year` resolves "present"/"current" range ends; parameterized so
/// tests stay deterministic.
pub fn analyze_with_year(text: &str, sections: &SectionSet, current_year: i32) -> ExperienceProfile {
    let scope = sections.get(SectionKind::Experience).unwrap_or(text);

    ExperienceProfile {
        total_years: total_years(scope, current_year),
        roles: extract_roles(scope),
        companies: extract_companies(scope),
        industries: tag_industries(text),
    }
}

/// Sums `max(0, end - start)` over every matched range. Overlaps
/// double-count by design.
fn total_years(scope: &str, current_year: i32) -> f64 {
    let mut total = 0.0;
    for caps in DATE_RANGE_RE.captures_iter(scope) {
        let start: i32 = match caps[1].parse() {
            Ok(year) => year,
            Err(_) => continue,
        };
        let end = match caps[2].to_lowercase().as_str() {
            "present" | "current" => current_year,
            year => match year.parse() {
                Ok(year) => year,
                Err(_) => continue,
            },
        };
        total += f64::from((end - start).max(0));
    }
    total
}

fn extract_companies(scope: &str) -> Vec<String> {
    let mut companies: Vec<String> = Vec::new();
    for line in scope.lines() {
        if let Some(name) = company_on_line(line) {
            // Case-sensitive dedup, preserving first-seen order.
            if !companies.contains(&name) {
                companies.push(name);
            }
        }
    }
    companies
}

/// Company name from a line carrying an organizational suffix keyword.
/// The text before a dash is preferred; the name is then narrowed to the
/// capitalized phrase ending at the suffix when one is present.
fn company_on_line(line: &str) -> Option<String> {
    if !has_org_suffix(line) {
        return None;
    }
    let before_dash = match line.find(['-', '–', '—']) {
        Some(idx) if has_org_suffix(&line[..idx]) => &line[..idx],
        _ => line,
    };
    if let Some(caps) = COMPANY_NAME_RE.captures(before_dash) {
        return Some(caps[1].trim().trim_end_matches('.').to_string());
    }
    let fallback = before_dash.trim();
    (!fallback.is_empty()).then(|| fallback.to_string())
}

fn has_org_suffix(text: &str) -> bool {
    let lower = text.to_lowercase();
    ORG_SUFFIXES.iter().any(|suffix| {
        lower.split(|c: char| !c.is_alphanumeric()).any(|word| word == *suffix)
    })
}

/// Role stubs from role-keyword lines, enriched in place when the same line
/// carries a company or date range. Bullet lines that follow become the
/// role's responsibilities.
fn extract_roles(scope: &str) -> Vec<Role> {
    let mut roles: Vec<Role> = Vec::new();

    for line in scope.lines() {
        let trimmed = line.trim();
        if let Some(text) = bullet_text(trimmed) {
            if let Some(role) = roles.last_mut() {
                role.responsibilities.push(text.to_string());
            }
            continue;
        }

        let Some(caps) = ROLE_TITLE_RE.captures(trimmed) else {
            continue;
        };
        let mut role = Role::stub(caps[1].trim());
        if let Some(company) = company_on_line(trimmed) {
            role.company = company;
        }
        if let Some(range) = DATE_RANGE_RE.find(trimmed) {
            role.duration = range.as_str().to_string();
        }
        roles.push(role);
    }

    roles
}

fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix(['-', '•', '*'])
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn tag_industries(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut industries: Vec<String> = Vec::new();
    for (keyword, tag) in INDUSTRY_KEYWORDS {
        if lower.contains(keyword) && !industries.iter().any(|t| t == tag) {
            industries.push((*tag).to_string());
        }
    }
    industries
}

#[derive(Debug, Deserialize)]
struct AiRole {
    title: String,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    responsibilities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AiExperience {
    #[serde(default)]
    roles: Vec<AiRole>,
    #[serde(default)]
    companies: Vec<String>,
    #[serde(default)]
    industries: Vec<String>,
}

/// Enhanced pass: the model may replace `"Unknown"` role fields and add
/// companies/industries the heuristics missed. `total_years` stays derived —
/// the model never authors it. Failures keep the heuristic result.
pub async fn enhance(
    mut base: ExperienceProfile,
    text: &str,
    sections: &SectionSet,
    classifier: &dyn Classifier,
    timeout: Duration,
) -> (ExperienceProfile, bool) {
    let scope = sections.get(SectionKind::Experience).unwrap_or(text);
    let payload = json!({ "experience_text": scope });
    let raw = match classify_with_timeout(
        classifier,
        prompts::TASK_EXTRACT_EXPERIENCE,
        &payload,
        timeout,
    )
    .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!("experience enhancement failed, keeping heuristic result: {e}");
            return (base, false);
        }
    };

    let parsed: AiExperience = match lenient::parse_lenient(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("experience enhancement response unusable: {e}");
            return (base, false);
        }
    };

    merge_roles(&mut base.roles, parsed.roles);
    for company in parsed.companies {
        let company = company.trim().to_string();
        if !company.is_empty() && !base.companies.contains(&company) {
            base.companies.push(company);
        }
    }
    for industry in parsed.industries {
        let industry = industry.trim().to_string();
        if !industry.is_empty() && !base.industries.iter().any(|t| *t == industry) {
            base.industries.push(industry);
        }
    }

    (base, true)
}

/// Title-matched roles have their `"Unknown"` fields filled; the rest are
/// appended.
fn merge_roles(base: &mut Vec<Role>, incoming: Vec<AiRole>) {
    for ai_role in incoming {
        if ai_role.title.trim().is_empty() {
            continue;
        }
        if let Some(existing) = base
            .iter_mut()
            .find(|r| r.title.eq_ignore_ascii_case(ai_role.title.trim()))
        {
            if existing.company == UNKNOWN {
                if let Some(company) = ai_role.company.filter(|c| !c.trim().is_empty()) {
                    existing.company = company;
                }
            }
            if existing.duration == UNKNOWN {
                if let Some(duration) = ai_role.duration.filter(|d| !d.trim().is_empty()) {
                    existing.duration = duration;
                }
            }
            if existing.responsibilities.is_empty() {
                existing.responsibilities = ai_role.responsibilities;
            }
        } else {
            base.push(Role {
                title: ai_role.title.trim().to_string(),
                company: ai_role.company.unwrap_or_else(|| UNKNOWN.to_string()),
                duration: ai_role.duration.unwrap_or_else(|| UNKNOWN.to_string()),
                responsibilities: ai_role.responsibilities,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "EXPERIENCE\nEngineer at Acme Corp 2019-2022\n- Built the billing pipeline\n- Cut deploy time\nSenior Developer - Initech Technologies 2015-2019\n";

    fn sections_for(text: &str) -> SectionSet {
        crate::extract::sections::segment(text)
    }

    #[test]
    fn test_total_years_simple_range() {
        let profile = analyze_with_year(
            "Engineer at Acme Corp 2019-2022",
            &SectionSet::default(),
            2026,
        );
        assert_eq!(profile.total_years, 3.0);
    }

    #[test]
    fn test_total_years_present_resolves_to_current_year() {
        let profile =
            analyze_with_year("Developer 2020-present", &SectionSet::default(), 2026);
        assert_eq!(profile.total_years, 6.0);
    }

    #[test]
    fn test_total_years_current_keyword() {
        let profile =
            analyze_with_year("Developer 2024 - Current", &SectionSet::default(), 2026);
        assert_eq!(profile.total_years, 2.0);
    }

    #[test]
    fn test_total_years_sums_ranges_including_overlap() {
        // Overlapping ranges double-count; documented approximation.
        let text = "Engineer 2018-2022\nConsultant 2020-2022";
        let profile = analyze_with_year(text, &SectionSet::default(), 2026);
        assert_eq!(profile.total_years, 6.0);
    }

    #[test]
    fn test_reversed_range_clamps_to_zero() {
        let profile =
            analyze_with_year("Engineer 2022-2019", &SectionSet::default(), 2026);
        assert_eq!(profile.total_years, 0.0);
    }

    #[test]
    fn test_company_from_suffix_line() {
        let profile = analyze_with_year(
            "Engineer at Acme Corp 2019-2022",
            &SectionSet::default(),
            2026,
        );
        assert_eq!(profile.companies, vec!["Acme Corp".to_string()]);
    }

    #[test]
    fn test_company_prefers_text_before_dash() {
        let profile = analyze_with_year(
            "Initech Technologies - Senior Engineer",
            &SectionSet::default(),
            2026,
        );
        assert_eq!(profile.companies, vec!["Initech Technologies".to_string()]);
    }

    #[test]
    fn test_companies_deduplicated_case_sensitive() {
        let text = "Acme Corp\nAcme Corp\nACME Corp";
        let profile = analyze_with_year(text, &SectionSet::default(), 2026);
        assert_eq!(
            profile.companies,
            vec!["Acme Corp".to_string(), "ACME Corp".to_string()]
        );
    }

    #[test]
    fn test_role_stub_with_unknown_fields() {
        let profile = analyze_with_year("Software Developer", &SectionSet::default(), 2026);
        assert_eq!(profile.roles.len(), 1);
        let role = &profile.roles[0];
        assert_eq!(role.title, "Software Developer");
        assert_eq!(role.company, UNKNOWN);
        assert_eq!(role.duration, UNKNOWN);
    }

    #[test]
    fn test_role_enriched_from_same_line() {
        let profile = analyze_with_year(
            "Engineer at Acme Corp 2019-2022",
            &SectionSet::default(),
            2026,
        );
        let role = &profile.roles[0];
        assert_eq!(role.company, "Acme Corp");
        assert_eq!(role.duration, "2019-2022");
    }

    #[test]
    fn test_bullet_lines_become_responsibilities() {
        let sections = sections_for(FIXTURE);
        let profile = analyze_with_year(FIXTURE, &sections, 2026);
        let engineer = &profile.roles[0];
        assert_eq!(
            engineer.responsibilities,
            vec![
                "Built the billing pipeline".to_string(),
                "Cut deploy time".to_string()
            ]
        );
    }

    #[test]
    fn test_experience_section_scopes_roles() {
        let text = "Objective\nBecome a great engineer\n\nEXPERIENCE\nDeveloper at Initech Systems 2020-2024\n";
        let sections = sections_for(text);
        let profile = analyze_with_year(text, &sections, 2026);
        assert_eq!(profile.roles.len(), 1);
        assert_eq!(profile.roles[0].company, "Initech Systems");
    }

    #[test]
    fn test_industries_tagged_from_full_text() {
        let text = "EXPERIENCE\nEngineer at a fintech and healthcare startup";
        let sections = sections_for(text);
        let profile = analyze_with_year(text, &sections, 2026);
        assert!(profile.industries.iter().any(|t| t == "Finance"));
        assert!(profile.industries.iter().any(|t| t == "Healthcare"));
    }

    #[test]
    fn test_no_dates_zero_years() {
        let profile = analyze_with_year("Engineer at Acme Corp", &SectionSet::default(), 2026);
        assert_eq!(profile.total_years, 0.0);
    }

    #[test]
    fn test_merge_roles_fills_unknown_fields_only() {
        let mut base = vec![Role::stub("Engineer")];
        merge_roles(
            &mut base,
            vec![AiRole {
                title: "Engineer".to_string(),
                company: Some("Acme Corp".to_string()),
                duration: Some("2019-2022".to_string()),
                responsibilities: vec!["Shipped".to_string()],
            }],
        );
        assert_eq!(base.len(), 1);
        assert_eq!(base[0].company, "Acme Corp");
        assert_eq!(base[0].duration, "2019-2022");
    }

    #[test]
    fn test_merge_roles_appends_new_titles() {
        let mut base = vec![Role::stub("Engineer")];
        merge_roles(
            &mut base,
            vec![AiRole {
                title: "Staff Architect".to_string(),
                company: None,
                duration: None,
                responsibilities: vec![],
            }],
        );
        assert_eq!(base.len(), 2);
        assert_eq!(base[1].company, UNKNOWN);
    }

    #[test]
    fn test_merge_roles_does_not_overwrite_known_company() {
        let mut base = vec![Role {
            title: "Engineer".to_string(),
            company: "Acme Corp".to_string(),
            duration: UNKNOWN.to_string(),
            responsibilities: vec![],
        }];
        merge_roles(
            &mut base,
            vec![AiRole {
                title: "Engineer".to_string(),
                company: Some("Globex Inc".to_string()),
                duration: None,
                responsibilities: vec![],
            }],
        );
        assert_eq!(base[0].company, "Acme Corp");
    }
}
