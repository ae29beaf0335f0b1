use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("{path}: {source}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The following columns are missing from the source file: {missing:?}")]
    SchemaMismatch { missing: Vec<String> },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Duplicate column name: {name}")]
    DuplicateColumn { name: String },

    #[error("Column '{name}' has {actual} values, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Non-numeric value {value:?} in column '{column}' at row {row}")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("No header row found in {path}")]
    EmptyInput { path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

/// 使用者可見的失敗類別，呼叫端依此判斷失敗原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    SchemaMismatch,
    Unexpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 配置錯誤，修正後可重新執行
    Medium,
    /// 輸入資料錯誤
    High,
    /// 系統錯誤 (寫檔、序列化)
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EtlError::FileNotFound { .. } => ErrorKind::FileNotFound,
            EtlError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            _ => ErrorKind::Unexpected,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorSeverity::Medium,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::FileNotFound => {
                format!("Error: Could not find one of the input files - {}", self)
            }
            ErrorKind::SchemaMismatch => format!("Error: {}", self),
            ErrorKind::Unexpected => format!("An unexpected error occurred: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::FileNotFound { .. } => "Check that the input paths exist and are readable",
            EtlError::SchemaMismatch { .. } => {
                "Add the missing columns to the source file or remove them from the template"
            }
            EtlError::ColumnNotFound { .. } => {
                "Sales input needs 'month', 'revenue' and 'cost' columns"
            }
            EtlError::NonNumericValue { .. } => "Revenue and cost cells must be plain numbers",
            EtlError::DuplicateColumn { .. }
            | EtlError::LengthMismatch { .. }
            | EtlError::EmptyInput { .. }
            | EtlError::CsvError(_) => "Check that the file is a well-formed CSV with a header row",
            EtlError::IoError(_) => "Check permissions and free space at the output location",
            EtlError::SerializationError(_) => "Re-run with --verbose and report the failure",
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => "Fix the configuration and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_lists_every_column() {
        let err = EtlError::SchemaMismatch {
            missing: vec!["Region".to_string(), "Owner".to_string()],
        };

        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
        assert_eq!(
            err.user_friendly_message(),
            r#"Error: The following columns are missing from the source file: ["Region", "Owner"]"#
        );
    }

    #[test]
    fn test_file_not_found_message() {
        let err = EtlError::FileNotFound {
            path: "missing.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };

        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err
            .user_friendly_message()
            .starts_with("Error: Could not find one of the input files - missing.csv"));
        assert_eq!(err.severity().exit_code(), 1);
    }

    #[test]
    fn test_other_errors_are_unexpected() {
        let err = EtlError::DuplicateColumn {
            name: "A".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err
            .user_friendly_message()
            .starts_with("An unexpected error occurred: "));

        let config_err = EtlError::MissingConfigError {
            field: "extract.source".to_string(),
        };
        assert_eq!(config_err.severity(), ErrorSeverity::Medium);
    }
}
