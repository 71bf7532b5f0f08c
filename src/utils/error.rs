use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Source '{source_id}' is unreadable: {reason}")]
    SourceUnreadable { source_id: String, reason: String },

    #[error("Failed to write '{path}': {reason}")]
    WriteFailure { path: String, reason: String },

    #[error("Required configuration '{field}' is missing")]
    ConfigurationMissing { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API responded with status {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No {kind} with slug '{slug}'")]
    NotFound { kind: &'static str, slug: String },

    #[error("A {kind} with slug '{slug}' already exists")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Invalid task payload: {message}")]
    InvalidPayload { message: String },
}

impl IngestError {
    /// Per-item errors are recorded in the batch report instead of aborting the run.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            IngestError::SourceUnreadable { .. }
                | IngestError::WriteFailure { .. }
                | IngestError::DuplicateSlug { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IngestError::SourceUnreadable { source_id, .. } => {
                format!("Could not read source document '{}'", source_id)
            }
            IngestError::WriteFailure { path, .. } => {
                format!("Could not save output document '{}'", path)
            }
            IngestError::ConfigurationMissing { field } => {
                format!("Setting '{}' is not configured", field)
            }
            IngestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            IngestError::ConfigError { message } => format!("Configuration problem: {}", message),
            IngestError::ApiError(_) | IngestError::ApiStatus { .. } => {
                "The content generation service could not be reached".to_string()
            }
            IngestError::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IngestError::SourceUnreadable { .. } => {
                "Check that the file is UTF-8 encoded HTML and re-run the ingestion"
            }
            IngestError::WriteFailure { .. } | IngestError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            IngestError::ConfigurationMissing { .. } => {
                "Set the value in the TOML config or the matching environment variable"
            }
            IngestError::InvalidConfigValueError { .. } | IngestError::ConfigError { .. } => {
                "Fix the configuration file and try again"
            }
            IngestError::ApiError(_) | IngestError::ApiStatus { .. } => {
                "Verify the API endpoint and key, then retry manually"
            }
            IngestError::SerializationError(_) => "Inspect the upstream response format",
            IngestError::NotFound { .. } => "Check the slug against the current catalog",
            IngestError::DuplicateSlug { .. } => "Pick a different title or slug",
            IngestError::Unauthorized { .. } => "Use the configured agent token",
            IngestError::InvalidPayload { .. } => "Send a non-empty title and a lowercase hyphenated slug",
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
