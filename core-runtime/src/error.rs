use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is out of range or a subsystem rejected its
    /// settings.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
