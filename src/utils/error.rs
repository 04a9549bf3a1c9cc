use thiserror::Error;

pub const ADDRESS_SPLIT_ERROR: &str = "Could not split combined street, PAON and SAON into respective parts. Expected street_PAON_SAON.";

#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("{message}")]
    InputFormat { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("More than one record found ({count} address records match)")]
    Conflict { count: usize },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} responded with an error: {message}")]
    Upstream { service: String, message: String },

    #[error("Unrecognised property type: {uri}")]
    UnknownPropertyType { uri: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Upstream,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PropertyError {
    pub fn input_format() -> Self {
        PropertyError::InputFormat {
            message: ADDRESS_SPLIT_ERROR.to_string(),
        }
    }

    pub fn upstream(service: &str, message: impl Into<String>) -> Self {
        PropertyError::Upstream {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PropertyError::InputFormat { .. } => ErrorCategory::Input,
            PropertyError::NotFound { .. } | PropertyError::Conflict { .. } => {
                ErrorCategory::Lookup
            }
            PropertyError::Http(_) | PropertyError::Upstream { .. } => ErrorCategory::Upstream,
            PropertyError::UnknownPropertyType { .. } | PropertyError::SerializationError(_) => {
                ErrorCategory::Data
            }
            PropertyError::ConfigValidationError { .. }
            | PropertyError::InvalidConfigValueError { .. }
            | PropertyError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PropertyError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// HTTP status the request handler answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            PropertyError::InputFormat { .. } | PropertyError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Lookup => self.to_string(),
            ErrorCategory::Upstream => format!("An upstream service failed: {}", self),
            ErrorCategory::Data => format!("Unexpected data from an upstream service: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PropertyError::InputFormat { .. } => {
                "Use the form /properties/<postcode>/<street>_<paon>[_<saon>]"
            }
            PropertyError::NotFound { .. } => "Check the postcode and address spelling",
            PropertyError::Conflict { .. } => {
                "The address index holds duplicate entries for this key; deduplicate the index"
            }
            PropertyError::Http(_) | PropertyError::Upstream { .. } => {
                "Check that the address store and price-paid endpoints are reachable"
            }
            PropertyError::UnknownPropertyType { .. } => {
                "Extend the property type allow-list if the vocabulary has changed"
            }
            PropertyError::SerializationError(_) => "Check the upstream response format",
            PropertyError::ConfigValidationError { .. }
            | PropertyError::InvalidConfigValueError { .. }
            | PropertyError::MissingConfigError { .. } => {
                "Fix the configuration file, command-line flags or environment variables"
            }
            PropertyError::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, PropertyError>;
