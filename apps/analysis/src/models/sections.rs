use serde::{Deserialize, Serialize};

/// The closed set of section labels the segmenter recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
    Certifications,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Achievements => "achievements",
            SectionKind::Certifications => "certifications",
        }
    }
}

/// A labeled contiguous block of resume text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
}

/// Sections in detection order. Each kind appears at most once; the first
/// occurrence of a duplicate header wins. Built once per document and never
/// mutated after segmentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSet {
    sections: Vec<Section>,
}

impl SectionSet {
    /// Inserts a section unless its kind is already present.
    pub fn insert(&mut self, kind: SectionKind, text: String) {
        if !self.contains(kind) {
            self.sections.push(Section { kind, text });
        }
    }

    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.text.as_str())
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|s| s.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in the order they were detected in the document.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut set = SectionSet::default();
        set.insert(SectionKind::Skills, "Rust, SQL".to_string());
        assert_eq!(set.get(SectionKind::Skills), Some("Rust, SQL"));
        assert_eq!(set.get(SectionKind::Education), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_kind_first_wins() {
        let mut set = SectionSet::default();
        set.insert(SectionKind::Skills, "first".to_string());
        set.insert(SectionKind::Skills, "second".to_string());
        assert_eq!(set.get(SectionKind::Skills), Some("first"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_preserves_detection_order() {
        let mut set = SectionSet::default();
        set.insert(SectionKind::Education, "MIT".to_string());
        set.insert(SectionKind::Experience, "Acme".to_string());
        let kinds: Vec<SectionKind> = set.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SectionKind::Education, SectionKind::Experience]);
    }

    #[test]
    fn test_empty_set() {
        let set = SectionSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(SectionKind::Summary));
    }
}
