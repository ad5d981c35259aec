use thiserror::Error;

/// Custom error type for shot-list planning operations.
#[derive(Debug, Error)]
pub enum ShotlistError {
    /// Input validation failed (bad project id, malformed artifact, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A pipeline stage could not complete.
    #[error("Stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },

    /// `run_step` was asked for a stage it cannot run in isolation.
    #[error("Invalid pipeline step {step}: {reason}")]
    InvalidStep { step: u8, reason: String },

    /// Configuration could not be loaded or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Filesystem operation failed.
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Artifact (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShotlistError {
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ShotlistError::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ShotlistError {
    fn from(err: std::io::Error) -> Self {
        ShotlistError::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ShotlistError {
    fn from(err: serde_json::Error) -> Self {
        ShotlistError::Serialization(format!("JSON: {}", err))
    }
}

impl From<serde_yaml_ng::Error> for ShotlistError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ShotlistError::Serialization(format!("YAML: {}", err))
    }
}

impl From<toml::de::Error> for ShotlistError {
    fn from(err: toml::de::Error) -> Self {
        ShotlistError::Config(err.to_string())
    }
}
