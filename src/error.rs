//! Typed errors for the spreadsheet facade and their protocol translation.
//!
//! The facade raises one of a closed set of error kinds; the dispatch layer
//! logs the full error and forwards only the kind and a one-line message as
//! an `rmcp::ErrorData`. Raw codec errors never cross the protocol boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExcelError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("worksheet '{sheet_name}' not found")]
    SheetNotFound { sheet_name: String },

    #[error("invalid range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("invalid cell reference '{cell}'")]
    InvalidCell { cell: String },

    #[error("invalid data: {reason}")]
    InvalidData { reason: String },

    #[error("worksheet '{sheet_name}' already exists")]
    DuplicateSheet { sheet_name: String },

    #[error("invalid format option '{key}': {reason}")]
    InvalidFormatOption { key: String, reason: String },

    #[error("unsupported chart type '{chart_type}' (expected one of: line, bar, pie, scatter)")]
    UnsupportedChartType { chart_type: String },

    #[error("operation failed: {0}")]
    OperationFailed(String),
}

impl ExcelError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn sheet_not_found(sheet_name: impl Into<String>) -> Self {
        Self::SheetNotFound {
            sheet_name: sheet_name.into(),
        }
    }

    pub fn invalid_range(range: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            range: range.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_cell(cell: impl Into<String>) -> Self {
        Self::InvalidCell { cell: cell.into() }
    }

    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }

    pub fn invalid_format_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormatOption {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn operation(error: impl std::fmt::Display) -> Self {
        Self::OperationFailed(error.to_string())
    }

    /// Stable machine-readable kind, surfaced alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "FileNotFound",
            Self::SheetNotFound { .. } => "SheetNotFound",
            Self::InvalidRange { .. } => "InvalidRange",
            Self::InvalidCell { .. } => "InvalidCell",
            Self::InvalidData { .. } => "InvalidData",
            Self::DuplicateSheet { .. } => "DuplicateSheet",
            Self::InvalidFormatOption { .. } => "InvalidFormatOption",
            Self::UnsupportedChartType { .. } => "UnsupportedChartType",
            Self::OperationFailed(_) => "OperationFailed",
        }
    }

    /// Validation-class errors are the caller's fault and map to
    /// `invalid_params`; the rest map to `internal_error`.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::OperationFailed(_))
    }
}

impl From<std::io::Error> for ExcelError {
    fn from(error: std::io::Error) -> Self {
        Self::OperationFailed(error.to_string())
    }
}

pub type ExcelResult<T> = Result<T, ExcelError>;

/// Translate a facade error into the protocol error shape. Full detail is
/// logged here; the caller sees only kind + message.
pub fn to_rmcp_error(tool: &str, error: ExcelError) -> rmcp::ErrorData {
    tracing::warn!(tool, kind = error.kind(), %error, "tool call failed");
    let message = format!("{}: {}", error.kind(), error);
    let data = Some(serde_json::json!({ "kind": error.kind() }));
    if error.is_client_error() {
        rmcp::ErrorData::invalid_params(message, data)
    } else {
        rmcp::ErrorData::internal_error(message, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_are_stable() {
        assert_eq!(
            ExcelError::file_not_found("/tmp/x.xlsx").kind(),
            "FileNotFound"
        );
        assert_eq!(ExcelError::sheet_not_found("Sheet2").kind(), "SheetNotFound");
        assert_eq!(
            ExcelError::invalid_range("Z9:A1", "inverted").kind(),
            "InvalidRange"
        );
        assert_eq!(ExcelError::operation("disk full").kind(), "OperationFailed");
    }

    #[test]
    fn file_not_found_message_includes_path() {
        let err = ExcelError::file_not_found("/data/missing.xlsx");
        assert!(err.to_string().contains("/data/missing.xlsx"));
    }

    #[test]
    fn client_errors_exclude_operation_failed() {
        assert!(ExcelError::invalid_cell("1A").is_client_error());
        assert!(
            ExcelError::UnsupportedChartType {
                chart_type: "radar".into()
            }
            .is_client_error()
        );
        assert!(!ExcelError::operation("corrupt zip").is_client_error());
    }
}
