use thiserror::Error;

pub const INVALID_CEP_MESSAGE: &str = "invalid zipcode";
pub const CEP_NOT_FOUND_MESSAGE: &str = "can not find zipcode";
pub const WEATHER_NOT_FOUND_MESSAGE: &str = "cannot find weather data";

/// Classification of a failed temperature lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCep,
    NotFound,
    Upstream,
}

/// Failure of a single temperature lookup request.
///
/// Every variant is terminal: nothing in the lookup path retries, and the
/// first error raised is the one that reaches the HTTP boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("invalid zipcode")]
    InvalidCep,

    #[error("can not find zipcode")]
    NotFound,

    #[error("{message}")]
    Upstream { message: String },
}

impl LookupError {
    pub fn upstream(message: impl Into<String>) -> Self {
        LookupError::Upstream {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidCep => ErrorKind::InvalidCep,
            LookupError::NotFound => ErrorKind::NotFound,
            LookupError::Upstream { .. } => ErrorKind::Upstream,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::upstream(err.to_string())
    }
}

/// Startup and infrastructure errors raised outside a lookup request.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("Telemetry error: {message}")]
    TelemetryError { message: String },
}

impl ServiceError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ServiceError::IoError(e) => format!("File or network operation failed: {}", e),
            ServiceError::HttpClientError(e) => format!("Could not build the HTTP client: {}", e),
            ServiceError::ConfigError { message } => format!("Configuration problem: {}", message),
            ServiceError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            ServiceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            ServiceError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            ServiceError::ServerError { message } => format!("Server stopped: {}", message),
            ServiceError::TelemetryError { message } => {
                format!("Could not start trace export: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ServiceError::IoError(_) => "Check that the config file exists and the bind address is free",
            ServiceError::HttpClientError(_) => "Check the TLS setup of the host",
            ServiceError::ConfigError { .. } | ServiceError::ConfigValidationError { .. } => {
                "Check the TOML syntax of the config file"
            }
            ServiceError::InvalidConfigValueError { .. } => "Fix the value in the config file or environment",
            ServiceError::MissingConfigError { .. } => {
                "Set the field in the config file or export the matching environment variable"
            }
            ServiceError::ServerError { .. } => "Inspect the logs above for the cause",
            ServiceError::TelemetryError { .. } => {
                "Check telemetry.otlp_endpoint or set telemetry.enabled = false"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
pub type LookupResult<T> = std::result::Result<T, LookupError>;
