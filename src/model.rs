//! Wire types shared by the tool layer: cell values and per-tool responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single cell value as it crosses the protocol boundary. Numbers keep
/// their numeric type, empty cells serialize as `null`, and formula cells
/// are reported as their literal text with a leading `=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ReadRangeResponse {
    pub file_path: String,
    pub sheet_name: String,
    /// The effective range read, in A1 notation.
    pub range: String,
    pub rows: u32,
    pub columns: u32,
    /// Row-major cell values.
    pub data: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WriteResponse {
    pub file_path: String,
    pub sheet_name: String,
    pub rows_written: u32,
    pub columns_written: u32,
    pub headers_added: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WorksheetSummary {
    pub name: String,
    pub rows: u32,
    pub columns: u32,
    /// Zero-based position in the workbook.
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WorksheetInfoResponse {
    pub file_path: String,
    pub total_worksheets: usize,
    pub worksheets: Vec<WorksheetSummary>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AddWorksheetResponse {
    pub file_path: String,
    pub sheet_name: String,
    pub total_worksheets: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct UpdateCellResponse {
    pub file_path: String,
    pub sheet_name: String,
    pub cell: String,
    /// True when the value was stored as a formula.
    pub is_formula: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ApplyFormulaResponse {
    pub file_path: String,
    pub sheet_name: String,
    pub cell: String,
    /// The formula as it reads back, including the leading `=`.
    pub formula: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FormatCellsResponse {
    pub file_path: String,
    pub sheet_name: String,
    pub range: String,
    pub cells_formatted: u32,
    /// The option keys that were applied.
    pub applied: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CreateChartResponse {
    pub file_path: String,
    pub sheet_name: String,
    pub chart_type: String,
    pub data_range: String,
    /// Top-left anchor cell of the inserted chart.
    pub position: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_value_serializes_untagged() {
        let row = vec![
            CellValue::Text("name".into()),
            CellValue::Number(42.0),
            CellValue::Bool(true),
            CellValue::Null,
        ];
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!(["name", 42.0, true, null]));
    }

    #[test]
    fn null_detection() {
        assert!(CellValue::Null.is_null());
        assert!(!CellValue::Number(0.0).is_null());
    }
}
