use bridge_traits::extraction::ExtractionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),
}

impl ReaderError {
    /// The underlying extraction error, if this is one.
    pub fn as_extraction(&self) -> Option<&ExtractionError> {
        match self {
            ReaderError::Extraction(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
