use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("No receipt found for id {id}")]
    ReceiptNotFound { id: String },

    #[error("Malformed receipt field '{field}' ('{value}'): {reason}")]
    MalformedReceipt {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid receipt payload: {message}")]
    InvalidPayload { message: String },

    #[error("Service responded with {status} {code}: {message}")]
    ServiceError {
        status: u16,
        code: String,
        message: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ReceiptError {
    pub fn malformed(field: impl Into<String>, value: &str, reason: impl Into<String>) -> Self {
        Self::MalformedReceipt {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP 狀態碼對應
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ReceiptNotFound { .. } => 404,
            Self::MalformedReceipt { .. } | Self::InvalidPayload { .. } => 400,
            Self::ServiceError { status, .. } => *status,
            _ => 500,
        }
    }

    /// 回應中的錯誤代碼
    pub fn code(&self) -> &'static str {
        match self.status_code() {
            404 => "NOT_FOUND",
            400 => "BAD_REQUEST",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ReceiptNotFound { .. } => "No receipt found for that ID.".to_string(),
            Self::MalformedReceipt { field, reason, .. } => {
                format!("The receipt is invalid: {} {}.", field, reason)
            }
            Self::InvalidPayload { .. } => "The receipt is not a valid JSON document.".to_string(),
            Self::ApiError(_) => "Could not reach the receipt service.".to_string(),
            Self::ServiceError { message, .. } => format!("The receipt service refused the request: {}", message),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
