use crate::domain::model::TierAttempt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoChronError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No postal areas found for pincode {pincode}")]
    NotFoundError { pincode: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Unable to find location for '{query}' after {} attempt(s)", .attempts.len())]
    LocationNotFound {
        query: String,
        attempts: Vec<TierAttempt>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// reqwest / serde_json 的失敗在本系統中一律視為網路層錯誤
impl From<reqwest::Error> for GeoChronError {
    fn from(e: reqwest::Error) -> Self {
        GeoChronError::NetworkError {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for GeoChronError {
    fn from(e: serde_json::Error) -> Self {
        GeoChronError::NetworkError {
            message: format!("unexpected response body: {}", e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Network,
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

impl GeoChronError {
    pub fn validation(message: impl Into<String>) -> Self {
        GeoChronError::ValidationError {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        GeoChronError::NetworkError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GeoChronError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GeoChronError::ValidationError { .. } => ErrorCategory::Input,
            GeoChronError::NotFoundError { .. } | GeoChronError::LocationNotFound { .. } => {
                ErrorCategory::Lookup
            }
            GeoChronError::NetworkError { .. } => ErrorCategory::Network,
            GeoChronError::ConfigError { .. } | GeoChronError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            GeoChronError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Lookup => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的單行訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            GeoChronError::ValidationError { message } => message.clone(),
            GeoChronError::NotFoundError { .. } => "Invalid pincode or no data found".to_string(),
            GeoChronError::NetworkError { message } => {
                format!("Error fetching postal areas: {}", message)
            }
            GeoChronError::LocationNotFound { .. } => {
                "Unable to find location. Please try selecting a different area or enter a different pincode."
                    .to_string()
            }
            GeoChronError::ConfigError { message } => format!("Configuration problem: {}", message),
            GeoChronError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for {} is invalid: {}", field, reason)
            }
            GeoChronError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GeoChronError::ValidationError { .. } => {
                "Check the pincode (6 digits), date (YYYY-MM-DD) and time (HH:MM[:SS]) inputs"
            }
            GeoChronError::NotFoundError { .. } => "Double-check the pincode with India Post",
            GeoChronError::NetworkError { .. } => {
                "Check your network connection and try again in a moment"
            }
            GeoChronError::LocationNotFound { .. } => {
                "Select a different postal area, or search a nearby place by name"
            }
            GeoChronError::ConfigError { .. } | GeoChronError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            GeoChronError::IoError(_) => "Make sure the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoChronError>;
