use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid filter pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("API returned status {status} for {endpoint}")]
    ApiStatusError { status: u16, endpoint: String },

    #[error("Provided token has no permissions to access actions of {owner}/{repo}")]
    AuthError { owner: String, repo: String },

    #[error("Cannot find workflow: '{workflow}', available workflows: '{}'", available.join("', '"))]
    WorkflowNotFound {
        workflow: String,
        available: Vec<String>,
    },

    #[error("Cannot detect workflow run id, waited {waited_secs} seconds")]
    RunDetectionTimeout { waited_secs: u64 },

    #[error("Workflow execution time is too long, waited {waited_secs} seconds")]
    WaitTimeout { waited_secs: u64 },

    #[error("No files were found in logs archive")]
    EmptyLogArchive,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 警告，不影響結果
    Low,
    /// 暫時性錯誤，重試可能成功
    Medium,
    /// 處理錯誤，需要人工介入
    High,
    /// 系統錯誤
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    RemoteWorkflow,
    DataProcessing,
    System,
}

impl RelayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RelayError::ApiError(_) | RelayError::ApiStatusError { .. } => ErrorCategory::Network,
            RelayError::AuthError { .. }
            | RelayError::WorkflowNotFound { .. }
            | RelayError::RunDetectionTimeout { .. }
            | RelayError::WaitTimeout { .. } => ErrorCategory::RemoteWorkflow,
            RelayError::ZipError(_)
            | RelayError::EmptyLogArchive
            | RelayError::SerializationError(_) => ErrorCategory::DataProcessing,
            RelayError::IoError(_) | RelayError::PatternError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路與輪詢超時屬於暫時性錯誤，重跑通常就會過
            RelayError::ApiError(_)
            | RelayError::ApiStatusError { .. }
            | RelayError::RunDetectionTimeout { .. }
            | RelayError::WaitTimeout { .. } => ErrorSeverity::Medium,
            RelayError::AuthError { .. }
            | RelayError::WorkflowNotFound { .. }
            | RelayError::ZipError(_)
            | RelayError::EmptyLogArchive
            | RelayError::SerializationError(_)
            | RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            RelayError::IoError(_) | RelayError::PatternError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RelayError::ApiError(_) | RelayError::ApiStatusError { .. } => {
                "Check network connectivity and GitHub API status, then retry".to_string()
            }
            RelayError::AuthError { .. } => {
                "Use a token with 'actions:read' and 'actions:write' scopes on the remote repo"
                    .to_string()
            }
            RelayError::WorkflowNotFound { .. } => {
                "Check workflow_file_name against the paths listed in the error message".to_string()
            }
            RelayError::RunDetectionTimeout { .. } => {
                "Check that the git ref exists and the workflow accepts workflow_dispatch events"
                    .to_string()
            }
            RelayError::WaitTimeout { .. } => {
                "Increase wait_timeout or inspect the run via its html_url".to_string()
            }
            RelayError::ZipError(_) | RelayError::EmptyLogArchive => {
                "The run may have produced no logs yet, retry after it settles".to_string()
            }
            RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            RelayError::SerializationError(_) => {
                "Check that client_payload is valid JSON".to_string()
            }
            RelayError::IoError(_) => "Check file system permissions and disk space".to_string(),
            RelayError::PatternError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RelayError::ApiError(e) => format!("GitHub API request failed: {}", e),
            RelayError::AuthError { owner, repo } => format!(
                "The provided token cannot access actions of {}/{}",
                owner, repo
            ),
            RelayError::WaitTimeout { waited_secs } => format!(
                "The remote workflow did not finish within {} seconds",
                waited_secs
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
