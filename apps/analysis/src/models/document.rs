use serde::{Deserialize, Serialize};

/// File formats the upstream document converter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Docx,
}

/// Metadata reported by the upstream binary-to-text converter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_size: u64,
    pub page_count: Option<u32>,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Plain-text document handed to the pipeline by the upstream converter.
/// Immutable once produced; the pipeline never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub text: String,
    pub source_format: SourceFormat,
    pub metadata: FileMetadata,
}

impl RawDocument {
    pub fn new(
        text: impl Into<String>,
        source_format: SourceFormat,
        metadata: FileMetadata,
    ) -> Self {
        Self {
            text: text.into(),
            source_format,
            metadata,
        }
    }
}
