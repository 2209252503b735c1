//! A1-notation cell and range parsing.
//!
//! Parsing delegates to the `umya-spreadsheet` coordinate helper so that the
//! accepted grammar matches what the codec itself understands. Absolute
//! markers (`$A$1`) are tolerated and ignored; lowercase column letters are
//! accepted. Inverted ranges are rejected, not normalized.

use std::fmt;

use crate::error::{ExcelError, ExcelResult};

/// A single cell position, 1-based in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub col: u32,
    pub row: u32,
}

impl CellRef {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Parse a bare cell reference like `B5` or `$B$5`.
    pub fn parse(cell: &str) -> ExcelResult<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() || trimmed.contains(':') {
            return Err(ExcelError::invalid_cell(cell));
        }
        let normalized = trimmed.to_ascii_uppercase();
        let (col, row, _, _) =
            umya_spreadsheet::helper::coordinate::index_from_coordinate(&normalized);
        match (col, row) {
            (Some(col), Some(row)) if col > 0 && row > 0 => Ok(Self { col, row }),
            _ => Err(ExcelError::invalid_cell(cell)),
        }
    }

    pub fn address(&self) -> String {
        cell_address(self.col, self.row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}

/// A rectangular cell range. A bare cell parses as the degenerate
/// single-cell range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    /// Parse `A1:D10` or a bare `B5`.
    pub fn parse(range: &str) -> ExcelResult<Self> {
        let trimmed = range.trim();
        if trimmed.is_empty() {
            return Err(ExcelError::invalid_range(range, "empty range"));
        }

        let (start_text, end_text) = match trimmed.split_once(':') {
            Some((start, end)) => (start, end),
            None => (trimmed, trimmed),
        };
        if end_text.contains(':') {
            return Err(ExcelError::invalid_range(range, "more than one ':'"));
        }

        let start = CellRef::parse(start_text)
            .map_err(|_| ExcelError::invalid_range(range, "unparseable start cell"))?;
        let end = CellRef::parse(end_text)
            .map_err(|_| ExcelError::invalid_range(range, "unparseable end cell"))?;

        if end.col < start.col || end.row < start.row {
            return Err(ExcelError::invalid_range(
                range,
                "end cell precedes start cell",
            ));
        }

        Ok(Self { start, end })
    }

    pub fn rows(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn columns(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

pub fn column_number_to_name(column: u32) -> String {
    let mut column = column;
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

pub fn cell_address(column: u32, row: u32) -> String {
    format!("{}{}", column_number_to_name(column), row)
}
