use thiserror::Error;

use crate::classifier::ClassifierError;

/// Pipeline-level error type.
///
/// Only the input-validation variants ever cross the caller boundary: stage
/// failures are absorbed by per-stage fallbacks and degrade quality, not
/// availability.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("document text is empty")]
    EmptyDocument,

    #[error("document text too short: {length} characters (minimum {minimum})")]
    DocumentTooShort { length: usize, minimum: usize },

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
