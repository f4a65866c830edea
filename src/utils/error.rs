use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfosearchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl InfosearchError {
    /// 給操作者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            InfosearchError::IoError(e) => format!("File operation failed: {}", e),
            InfosearchError::HttpClientError(e) => format!("Could not create HTTP client: {}", e),
            InfosearchError::ConfigError { message } => message.clone(),
            InfosearchError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            InfosearchError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            InfosearchError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            InfosearchError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            InfosearchError::IoError(_) => "Check that the path exists and is writable",
            InfosearchError::HttpClientError(_) => "Check the TLS setup and timeout settings",
            InfosearchError::ConfigError { .. }
            | InfosearchError::ConfigValidationError { .. }
            | InfosearchError::InvalidConfigValueError { .. }
            | InfosearchError::MissingConfigError { .. } => {
                "Fix the settings file or command-line flags and re-run"
            }
            InfosearchError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }
}

/// 文字生成服務的錯誤，依種類區分是否可重試
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("429 Too Many Requests: {message}")]
    RateLimited { message: String },

    #[error("API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerationError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status == reqwest::StatusCode::TOO_MANY_REQUESTS => {
                GenerationError::RateLimited {
                    message: err.to_string(),
                }
            }
            _ => GenerationError::Transport(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, InfosearchError>;
