//! The spreadsheet operations facade.
//!
//! Every operation is stateless: open the file, perform one query or
//! mutation, save (for mutations), drop the workbook. Validation of
//! caller-supplied arguments happens before the file is opened, so a
//! rejected call leaves the file byte-identical.

use std::path::Path;

use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::structs::Chart;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::charts::{self, ChartKind};
use crate::error::{ExcelError, ExcelResult};
use crate::model::{
    AddWorksheetResponse, ApplyFormulaResponse, CellValue, CreateChartResponse,
    FormatCellsResponse, ReadRangeResponse, UpdateCellResponse, WorksheetInfoResponse,
    WorksheetSummary, WriteResponse,
};
use crate::range::{cell_address, CellRange, CellRef};
use crate::styles::FormatOptions;

fn open_workbook(path: &Path) -> ExcelResult<Spreadsheet> {
    if !path.exists() {
        return Err(ExcelError::file_not_found(path));
    }
    umya_spreadsheet::reader::xlsx::read(path).map_err(ExcelError::operation)
}

fn save_workbook(book: &Spreadsheet, path: &Path) -> ExcelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(ExcelError::operation)
}

fn sheet<'a>(book: &'a Spreadsheet, name: &str) -> ExcelResult<&'a Worksheet> {
    book.get_sheet_by_name(name)
        .ok_or_else(|| ExcelError::sheet_not_found(name))
}

fn sheet_mut<'a>(book: &'a mut Spreadsheet, name: &str) -> ExcelResult<&'a mut Worksheet> {
    book.get_sheet_by_name_mut(name)
        .ok_or_else(|| ExcelError::sheet_not_found(name))
}

fn first_sheet_name(book: &Spreadsheet) -> ExcelResult<String> {
    book.get_sheet(&0)
        .map(|s| s.get_name().to_string())
        .ok_or_else(|| ExcelError::invalid_data("workbook has no worksheets"))
}

/// The value a cell reports over the wire. Formula cells return their
/// literal text with a leading `=`; nothing is ever evaluated.
fn cell_to_value(worksheet: &Worksheet, cell_ref: CellRef) -> CellValue {
    let address = cell_ref.address();
    let Some(cell) = worksheet.get_cell(address.as_str()) else {
        return CellValue::Null;
    };

    if cell.is_formula() {
        return CellValue::Text(format!("={}", cell.get_formula()));
    }

    let raw = cell.get_value();
    if raw.is_empty() {
        return CellValue::Null;
    }
    // The stored data type drives the mapping; sniffing the display text
    // would misread strings like "007" or "TRUE".
    match cell.get_data_type() {
        "s" => CellValue::Text(raw.to_string()),
        "b" => CellValue::Bool(raw == "TRUE"),
        "n" => match cell.get_value_number() {
            Some(number) if number.is_finite() => CellValue::Number(number),
            _ => CellValue::Text(raw.to_string()),
        },
        // Untyped cells keep the old text sniff.
        _ => {
            if let Ok(number) = raw.parse::<f64>()
                && number.is_finite()
            {
                CellValue::Number(number)
            } else if raw.eq_ignore_ascii_case("true") {
                CellValue::Bool(true)
            } else if raw.eq_ignore_ascii_case("false") {
                CellValue::Bool(false)
            } else {
                CellValue::Text(raw.to_string())
            }
        }
    }
}

pub fn read_range(
    path: &Path,
    sheet_name: Option<&str>,
    range: Option<&str>,
) -> ExcelResult<ReadRangeResponse> {
    let parsed_range = range.map(CellRange::parse).transpose()?;

    let book = open_workbook(path)?;
    let sheet_name = match sheet_name {
        Some(name) => name.to_string(),
        None => first_sheet_name(&book)?,
    };
    let worksheet = sheet(&book, &sheet_name)?;

    let effective = match parsed_range {
        Some(range) => Some(range),
        None => {
            // Used extent. An untouched sheet has no cells at all.
            let (max_col, max_row) = worksheet.get_highest_column_and_row();
            if max_col == 0 || max_row == 0 {
                None
            } else {
                Some(CellRange::new(
                    CellRef::new(1, 1),
                    CellRef::new(max_col, max_row),
                ))
            }
        }
    };

    let Some(effective) = effective else {
        return Ok(ReadRangeResponse {
            file_path: path.display().to_string(),
            sheet_name,
            range: "A1".to_string(),
            rows: 0,
            columns: 0,
            data: Vec::new(),
        });
    };

    let mut data = Vec::with_capacity(effective.rows() as usize);
    for row in effective.start.row..=effective.end.row {
        let mut row_values = Vec::with_capacity(effective.columns() as usize);
        for col in effective.start.col..=effective.end.col {
            row_values.push(cell_to_value(worksheet, CellRef::new(col, row)));
        }
        data.push(row_values);
    }

    Ok(ReadRangeResponse {
        file_path: path.display().to_string(),
        sheet_name,
        range: effective.to_string(),
        rows: effective.rows(),
        columns: effective.columns(),
        data,
    })
}

fn write_value(worksheet: &mut Worksheet, cell_ref: CellRef, value: &CellValue) {
    let cell = worksheet.get_cell_mut(cell_ref.address().as_str());
    match value {
        CellValue::Null => {}
        CellValue::Bool(b) => {
            cell.set_value_bool(*b);
        }
        CellValue::Number(n) => {
            cell.set_value_number(*n);
        }
        CellValue::Text(text) => {
            if let Some(body) = text.strip_prefix('=') {
                cell.set_formula(body.to_string());
            } else {
                cell.set_value_string(text.clone());
            }
        }
    }
}

pub fn write_rows(
    path: &Path,
    data: &[Vec<CellValue>],
    sheet_name: Option<&str>,
    headers: Option<&[String]>,
) -> ExcelResult<WriteResponse> {
    if data.is_empty() {
        return Err(ExcelError::invalid_data("data must contain at least one row"));
    }
    let width = data[0].len();
    if width == 0 {
        return Err(ExcelError::invalid_data("rows must contain at least one cell"));
    }
    for (index, row) in data.iter().enumerate() {
        if row.len() != width {
            return Err(ExcelError::invalid_data(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                width
            )));
        }
    }
    if let Some(headers) = headers
        && headers.len() != width
    {
        return Err(ExcelError::invalid_data(format!(
            "headers have {} entries, expected {}",
            headers.len(),
            width
        )));
    }

    let creating = !path.exists();
    let mut book = if creating {
        umya_spreadsheet::new_file()
    } else {
        open_workbook(path)?
    };

    let sheet_name = match sheet_name {
        Some(name) => {
            if book.get_sheet_by_name(name).is_none() {
                if creating {
                    // A fresh workbook carries one default sheet; rename it
                    // instead of leaving it behind empty.
                    if let Some(first) = book.get_sheet_mut(&0) {
                        first.set_name(name);
                    }
                } else {
                    book.new_sheet(name).map_err(ExcelError::operation)?;
                }
            }
            name.to_string()
        }
        None => first_sheet_name(&book)?,
    };

    let worksheet = sheet_mut(&mut book, &sheet_name)?;
    let headers_added = headers.is_some();
    if let Some(headers) = headers {
        for (offset, header) in headers.iter().enumerate() {
            let cell_ref = CellRef::new(offset as u32 + 1, 1);
            worksheet
                .get_cell_mut(cell_ref.address().as_str())
                .set_value_string(header.clone());
        }
    }

    let first_data_row = if headers_added { 2 } else { 1 };
    for (row_offset, row) in data.iter().enumerate() {
        for (col_offset, value) in row.iter().enumerate() {
            let cell_ref = CellRef::new(col_offset as u32 + 1, first_data_row + row_offset as u32);
            write_value(worksheet, cell_ref, value);
        }
    }

    save_workbook(&book, path)?;

    Ok(WriteResponse {
        file_path: path.display().to_string(),
        sheet_name: sheet_name.clone(),
        rows_written: data.len() as u32,
        columns_written: width as u32,
        headers_added,
        message: format!(
            "wrote {} row(s) x {} column(s) to '{}'",
            data.len(),
            width,
            sheet_name
        ),
    })
}

pub fn worksheet_info(path: &Path) -> ExcelResult<WorksheetInfoResponse> {
    let book = open_workbook(path)?;
    let worksheets: Vec<WorksheetSummary> = book
        .get_sheet_collection()
        .iter()
        .enumerate()
        .map(|(index, worksheet)| {
            let (columns, rows) = worksheet.get_highest_column_and_row();
            WorksheetSummary {
                name: worksheet.get_name().to_string(),
                rows,
                columns,
                index,
            }
        })
        .collect();

    Ok(WorksheetInfoResponse {
        file_path: path.display().to_string(),
        total_worksheets: worksheets.len(),
        worksheets,
    })
}

pub fn add_worksheet(path: &Path, sheet_name: &str) -> ExcelResult<AddWorksheetResponse> {
    if sheet_name.trim().is_empty() {
        return Err(ExcelError::invalid_data("sheet name must not be empty"));
    }

    let mut book = open_workbook(path)?;
    if book.get_sheet_by_name(sheet_name).is_some() {
        return Err(ExcelError::DuplicateSheet {
            sheet_name: sheet_name.to_string(),
        });
    }
    book.new_sheet(sheet_name).map_err(ExcelError::operation)?;
    save_workbook(&book, path)?;

    Ok(AddWorksheetResponse {
        file_path: path.display().to_string(),
        sheet_name: sheet_name.to_string(),
        total_worksheets: book.get_sheet_collection().len(),
        message: format!("added worksheet '{sheet_name}'"),
    })
}

pub fn set_cell(
    path: &Path,
    sheet_name: &str,
    cell: &str,
    value: &CellValue,
) -> ExcelResult<UpdateCellResponse> {
    let cell_ref = CellRef::parse(cell)?;

    let mut book = open_workbook(path)?;
    let worksheet = sheet_mut(&mut book, sheet_name)?;
    write_value(worksheet, cell_ref, value);
    let is_formula = matches!(value, CellValue::Text(text) if text.starts_with('='));
    save_workbook(&book, path)?;

    Ok(UpdateCellResponse {
        file_path: path.display().to_string(),
        sheet_name: sheet_name.to_string(),
        cell: cell_ref.address(),
        is_formula,
        message: format!("updated cell {}", cell_ref.address()),
    })
}

pub fn apply_formula(
    path: &Path,
    sheet_name: &str,
    cell: &str,
    formula: &str,
) -> ExcelResult<ApplyFormulaResponse> {
    let cell_ref = CellRef::parse(cell)?;
    let body = formula.trim().trim_start_matches('=').to_string();
    if body.is_empty() {
        return Err(ExcelError::invalid_data("formula must not be empty"));
    }

    let mut book = open_workbook(path)?;
    let worksheet = sheet_mut(&mut book, sheet_name)?;
    worksheet
        .get_cell_mut(cell_ref.address().as_str())
        .set_formula(body.clone());
    save_workbook(&book, path)?;

    Ok(ApplyFormulaResponse {
        file_path: path.display().to_string(),
        sheet_name: sheet_name.to_string(),
        cell: cell_ref.address(),
        formula: format!("={body}"),
        message: format!("applied formula to {}", cell_ref.address()),
    })
}

pub fn format_range(
    path: &Path,
    sheet_name: &str,
    range: &str,
    format_options: &serde_json::Map<String, serde_json::Value>,
) -> ExcelResult<FormatCellsResponse> {
    let parsed = CellRange::parse(range)?;
    let (options, applied) = FormatOptions::from_map(format_options)?;

    let mut book = open_workbook(path)?;
    let worksheet = sheet_mut(&mut book, sheet_name)?;

    let mut cells_formatted = 0u32;
    for row in parsed.start.row..=parsed.end.row {
        for col in parsed.start.col..=parsed.end.col {
            let address = cell_address(col, row);
            let cell = worksheet.get_cell_mut(address.as_str());
            let mut style = cell.get_style().clone();
            options.apply_to(&mut style);
            cell.set_style(style);
            cells_formatted += 1;
        }
    }
    save_workbook(&book, path)?;

    Ok(FormatCellsResponse {
        file_path: path.display().to_string(),
        sheet_name: sheet_name.to_string(),
        range: parsed.to_string(),
        cells_formatted,
        applied,
        message: format!("formatted {cells_formatted} cell(s) in {parsed}"),
    })
}

pub fn insert_chart(
    path: &Path,
    sheet_name: &str,
    data_range: &str,
    chart_type: &str,
    title: Option<&str>,
    position: Option<&str>,
) -> ExcelResult<CreateChartResponse> {
    let kind = ChartKind::parse(chart_type)?;
    let parsed_range = CellRange::parse(data_range)?;
    let top_left = match position {
        Some(cell) => CellRef::parse(cell)?,
        None => charts::default_anchor(&parsed_range),
    };
    let bottom_right = charts::anchor_extent(top_left);

    let mut book = open_workbook(path)?;
    // Existence check up front; the chart builder needs the name, not the
    // worksheet borrow.
    sheet(&book, sheet_name)?;

    let series = charts::series_reference(sheet_name, &parsed_range);
    let mut from_marker = MarkerType::default();
    from_marker.set_coordinate(top_left.address());
    let mut to_marker = MarkerType::default();
    to_marker.set_coordinate(bottom_right.address());

    let mut chart = Chart::default();
    chart.new_chart(
        kind.to_chart_type(),
        from_marker,
        to_marker,
        vec![series.as_str()],
    );
    if let Some(title) = title {
        chart.set_title(title);
    }

    let worksheet = sheet_mut(&mut book, sheet_name)?;
    worksheet.add_chart(chart);
    save_workbook(&book, path)?;

    Ok(CreateChartResponse {
        file_path: path.display().to_string(),
        sheet_name: sheet_name.to_string(),
        chart_type: kind.to_string(),
        data_range: parsed_range.to_string(),
        position: top_left.address(),
        message: format!("inserted {kind} chart at {}", top_left.address()),
    })
}
