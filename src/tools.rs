//! Tool parameter types and implementations.
//!
//! Each tool resolves the workbook path against the workspace root, takes
//! that file's lock for the duration of the call, and delegates to the
//! facade in `workbook`.

use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ExcelResult;
use crate::model::{
    AddWorksheetResponse, ApplyFormulaResponse, CellValue, CreateChartResponse,
    FormatCellsResponse, ReadRangeResponse, UpdateCellResponse, WorksheetInfoResponse,
    WriteResponse,
};
use crate::state::AppState;
use crate::workbook;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadExcelFileParams {
    /// Path to the workbook, absolute or relative to the workspace root.
    pub file_path: String,
    /// Worksheet to read. Defaults to the first sheet.
    pub sheet_name: Option<String>,
    /// A1-notation range, e.g. "A1:D10". Defaults to the used extent.
    pub range: Option<String>,
}

pub async fn read_excel_file(
    state: Arc<AppState>,
    params: ReadExcelFileParams,
) -> ExcelResult<ReadRangeResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::read_range(&path, params.sheet_name.as_deref(), params.range.as_deref())
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteExcelFileParams {
    pub file_path: String,
    /// Row-major cell values, anchored at column A.
    pub data: Vec<Vec<CellValue>>,
    /// Worksheet to write. Defaults to the first sheet; created if missing.
    pub sheet_name: Option<String>,
    /// Optional header row, written to row 1 with data below it.
    pub headers: Option<Vec<String>>,
}

pub async fn write_excel_file(
    state: Arc<AppState>,
    params: WriteExcelFileParams,
) -> ExcelResult<WriteResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::write_rows(
        &path,
        &params.data,
        params.sheet_name.as_deref(),
        params.headers.as_deref(),
    )
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWorksheetInfoParams {
    pub file_path: String,
}

pub async fn get_worksheet_info(
    state: Arc<AppState>,
    params: GetWorksheetInfoParams,
) -> ExcelResult<WorksheetInfoResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::worksheet_info(&path)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddWorksheetParams {
    pub file_path: String,
    pub sheet_name: String,
}

pub async fn add_worksheet(
    state: Arc<AppState>,
    params: AddWorksheetParams,
) -> ExcelResult<AddWorksheetResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::add_worksheet(&path, &params.sheet_name)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateCellParams {
    pub file_path: String,
    pub sheet_name: String,
    /// Single cell reference, e.g. "B2".
    pub cell: String,
    /// New value. Strings starting with '=' are stored as formulas.
    pub value: CellValue,
}

pub async fn update_cell(
    state: Arc<AppState>,
    params: UpdateCellParams,
) -> ExcelResult<UpdateCellResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::set_cell(&path, &params.sheet_name, &params.cell, &params.value)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ApplyFormulaParams {
    pub file_path: String,
    pub sheet_name: String,
    pub cell: String,
    /// Formula text, with or without the leading '='.
    pub formula: String,
}

pub async fn apply_formula(
    state: Arc<AppState>,
    params: ApplyFormulaParams,
) -> ExcelResult<ApplyFormulaResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::apply_formula(&path, &params.sheet_name, &params.cell, &params.formula)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FormatCellsParams {
    pub file_path: String,
    pub sheet_name: String,
    pub range: String,
    /// Recognized keys: bold, italic, underline, font_size, font_name,
    /// font_color, background_color, number_format, border_style,
    /// horizontal_alignment, wrap_text. Unknown keys are rejected.
    pub format_options: serde_json::Map<String, serde_json::Value>,
}

pub async fn format_cells(
    state: Arc<AppState>,
    params: FormatCellsParams,
) -> ExcelResult<FormatCellsResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::format_range(
        &path,
        &params.sheet_name,
        &params.range,
        &params.format_options,
    )
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateChartParams {
    pub file_path: String,
    pub sheet_name: String,
    /// A1-notation range the chart series reads from.
    pub data_range: String,
    /// One of: line, bar, pie, scatter.
    pub chart_type: String,
    pub title: Option<String>,
    /// Top-left anchor cell. Defaults to two columns right of the data
    /// range.
    pub position: Option<String>,
}

pub async fn create_chart(
    state: Arc<AppState>,
    params: CreateChartParams,
) -> ExcelResult<CreateChartResponse> {
    let path = state.resolve_path(&params.file_path);
    let lock = state.lock_for(&path);
    let _held = lock.lock().await;
    workbook::insert_chart(
        &path,
        &params.sheet_name,
        &params.data_range,
        &params.chart_type,
        params.title.as_deref(),
        params.position.as_deref(),
    )
}
