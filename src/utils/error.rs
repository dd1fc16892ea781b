use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API responded with status {status}")]
    ApiError {
        status: u16,
        trace_id: Option<String>,
        body: String,
    },

    #[error("Response from {endpoint} failed schema validation: {source}")]
    SchemaError {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidConfigValueError { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, PayoutError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Api,
    Schema,
    Validation,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PayoutError {
    pub fn validation(message: impl Into<String>) -> Self {
        PayoutError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PayoutError::HttpError(_) => ErrorCategory::Transport,
            PayoutError::ApiError { .. } => ErrorCategory::Api,
            PayoutError::SchemaError { .. } => ErrorCategory::Schema,
            PayoutError::ValidationError { .. } => ErrorCategory::Validation,
            PayoutError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PayoutError::HttpError(_) => ErrorSeverity::Critical,
            PayoutError::ApiError { status, .. } if *status >= 500 => ErrorSeverity::Critical,
            PayoutError::ApiError { .. } => ErrorSeverity::High,
            PayoutError::SchemaError { .. } => ErrorSeverity::High,
            PayoutError::ValidationError { .. } => ErrorSeverity::High,
            PayoutError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PayoutError::HttpError(e) => format!("Could not reach the payments API: {}", e),
            PayoutError::ApiError { status, .. } => {
                format!("The payments API rejected the request (status {})", status)
            }
            PayoutError::SchemaError { endpoint, .. } => {
                format!("The payments API returned an unexpected response from {}", endpoint)
            }
            PayoutError::ValidationError { message } => message.clone(),
            PayoutError::InvalidConfigValueError { field, reason } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PayoutError::HttpError(_) => "Check network connectivity and the API base URL",
            PayoutError::ApiError { status: 401, .. } | PayoutError::ApiError { status: 403, .. } => {
                "Check that WISE_API_TOKEN is set to a valid sandbox token"
            }
            PayoutError::ApiError { .. } => "Inspect the logged trace id and response body",
            PayoutError::SchemaError { .. } => "The API contract may have changed; inspect the logged body",
            PayoutError::ValidationError { .. } => "Verify the sandbox account setup (profiles, balances)",
            PayoutError::InvalidConfigValueError { .. } => "Fix the CLI arguments and retry",
        }
    }
}
