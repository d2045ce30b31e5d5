use serde::{Deserialize, Serialize};

/// Sentinel for fields the line-based extractors cannot determine.
/// Kept in the object shape rather than omitted.
pub const UNKNOWN: &str = "Unknown";

/// A single extracted value paired with extractor certainty in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidentField {
    pub value: String,
    pub confidence: f64,
}

impl ConfidentField {
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Contact fields extracted from the top of the document. An absent field is
/// `None`, never a zero-confidence entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: Option<ConfidentField>,
    pub email: Option<ConfidentField>,
    pub phone: Option<ConfidentField>,
    pub location: Option<ConfidentField>,
    pub linkedin: Option<ConfidentField>,
    pub github: Option<ConfidentField>,
    pub website: Option<ConfidentField>,
    pub summary: Option<ConfidentField>,
}

/// Closed set of technical skill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Programming,
    Database,
    Cloud,
    Devops,
    Frontend,
    Backend,
    Mobile,
    Other,
}

impl SkillCategory {
    /// Maps a free-form category label (e.g. from a model response) onto the
    /// closed set. Unrecognized labels land in `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "programming" | "programming_language" | "language" => SkillCategory::Programming,
            "database" | "databases" => SkillCategory::Database,
            "cloud" => SkillCategory::Cloud,
            "devops" => SkillCategory::Devops,
            "frontend" | "front-end" => SkillCategory::Frontend,
            "backend" | "back-end" => SkillCategory::Backend,
            "mobile" => SkillCategory::Mobile,
            _ => SkillCategory::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSkill {
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: Option<String>,
    pub years_of_experience: Option<f64>,
}

impl TechnicalSkill {
    pub fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            name: name.into(),
            category,
            proficiency: None,
            years_of_experience: None,
        }
    }
}

/// Skills bucketed by kind. Name uniqueness is per bucket, case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsProfile {
    pub technical: Vec<TechnicalSkill>,
    pub soft: Vec<String>,
    pub frameworks: Vec<String>,
    pub languages: Vec<String>,
    pub tools: Vec<String>,
    pub certifications: Vec<String>,
}

impl SkillsProfile {
    pub fn is_empty(&self) -> bool {
        self.technical.is_empty()
            && self.soft.is_empty()
            && self.frameworks.is_empty()
            && self.languages.is_empty()
            && self.tools.is_empty()
            && self.certifications.is_empty()
    }

    /// Adds a technical skill unless the name is already present (case-insensitive).
    pub fn push_technical(&mut self, skill: TechnicalSkill) {
        if !self
            .technical
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&skill.name))
        {
            self.technical.push(skill);
        }
    }
}

/// Adds `value` to a string bucket unless already present (case-insensitive).
pub fn push_unique(bucket: &mut Vec<String>, value: &str) {
    if !bucket.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        bucket.push(value.to_string());
    }
}

/// A single role mention. Company and duration fall back to the `"Unknown"`
/// sentinel until enriched from the same line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub responsibilities: Vec<String>,
}

impl Role {
    pub fn stub(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: UNKNOWN.to_string(),
            duration: UNKNOWN.to_string(),
            responsibilities: Vec::new(),
        }
    }
}

/// Work-experience summary. `total_years` is derived from date ranges, never
/// authored directly; overlapping ranges double-count (documented
/// approximation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceProfile {
    pub total_years: f64,
    pub roles: Vec<Role>,
    pub companies: Vec<String>,
    pub industries: Vec<String>,
}

/// One education mention. Institution is `"Unknown"` when not separable from
/// the degree line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<f64>,
    pub achievements: Vec<String>,
}
