use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store request failed: {0}")]
    StoreRequestError(#[from] reqwest::Error),

    #[error("Store responded with status {status}: {message}")]
    StoreResponseError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unknown tool: {name}")]
    UnknownToolError { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Store,
    Config,
    Validation,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::StoreRequestError(_) | AppError::StoreResponseError { .. } => {
                ErrorCategory::Store
            }
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorCategory::Config,
            AppError::ValidationError { .. } | AppError::UnknownToolError { .. } => {
                ErrorCategory::Validation
            }
            AppError::IoError(_) => ErrorCategory::Io,
            AppError::SerializationError(_) | AppError::CsvError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 連線或逾時通常可以重試
            AppError::StoreRequestError(e) if e.is_timeout() || e.is_connect() => {
                ErrorSeverity::Medium
            }
            AppError::StoreResponseError { status, .. } if *status >= 500 => {
                ErrorSeverity::Medium
            }
            AppError::StoreRequestError(_) | AppError::StoreResponseError { .. } => {
                ErrorSeverity::High
            }
            AppError::ValidationError { .. } | AppError::UnknownToolError { .. } => {
                ErrorSeverity::Low
            }
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorSeverity::High,
            AppError::SerializationError(_) | AppError::CsvError(_) => ErrorSeverity::High,
            AppError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::StoreRequestError(_) => {
                "Check network connectivity and the store URL, then retry".to_string()
            }
            AppError::StoreResponseError { status, .. } => match status {
                401 | 403 => "Check that the store API key is valid for this project".to_string(),
                404 => "Check the configured table names under [store.tables]".to_string(),
                s if *s >= 500 => "The store is having trouble; retry later".to_string(),
                _ => "Review the query parameters sent to the store".to_string(),
            },
            AppError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AppError::SerializationError(_) => {
                "The store returned rows with an unexpected shape; check the table schema"
                    .to_string()
            }
            AppError::CsvError(_) => "Try a different output format".to_string(),
            AppError::ConfigValidationError { field, .. }
            | AppError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the configuration file", field)
            }
            AppError::MissingConfigError { field } => {
                format!("Provide '{}' in the configuration file or on the command line", field)
            }
            AppError::ValidationError { .. } => {
                "Check the tool parameters against its declared schema".to_string()
            }
            AppError::UnknownToolError { .. } => {
                "Run the 'tools' command to list the available tools".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Store => format!("Could not query the resort database: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Data => format!("Could not process data: {}", self),
        }
    }

    /// 是否為資料存放區的讀取失敗
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            AppError::StoreRequestError(_)
                | AppError::StoreResponseError { .. }
                | AppError::SerializationError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
