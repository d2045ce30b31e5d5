pub mod analysis;
pub mod document;
pub mod profile;
pub mod sections;

pub use analysis::{ExtractionMethod, QualityMetrics, ResumeAnalysis};
pub use document::{FileMetadata, RawDocument, SourceFormat};
pub use profile::{
    ConfidentField, ContactFields, EducationEntry, ExperienceProfile, Role, SkillCategory,
    SkillsProfile, TechnicalSkill,
};
pub use sections::{Section, SectionKind, SectionSet};
