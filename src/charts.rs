//! Chart kinds and anchor placement.

use std::str::FromStr;

use strum::{Display, EnumString};
use umya_spreadsheet::structs::ChartType;

use crate::error::{ExcelError, ExcelResult};
use crate::range::{CellRange, CellRef};

/// Chart block size in cells, width x height.
const ANCHOR_COLUMNS: u32 = 8;
const ANCHOR_ROWS: u32 = 15;

/// Supported chart kinds. The string forms are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
}

impl ChartKind {
    pub fn parse(raw: &str) -> ExcelResult<Self> {
        Self::from_str(raw.trim()).map_err(|_| ExcelError::UnsupportedChartType {
            chart_type: raw.to_string(),
        })
    }

    pub fn to_chart_type(self) -> ChartType {
        match self {
            Self::Line => ChartType::LineChart,
            Self::Bar => ChartType::BarChart,
            Self::Pie => ChartType::PieChart,
            Self::Scatter => ChartType::ScatterChart,
        }
    }
}

/// Where a chart lands when the caller gives no position: two columns right
/// of the data range's top-right corner.
pub fn default_anchor(data_range: &CellRange) -> CellRef {
    CellRef::new(data_range.end.col + 2, data_range.start.row)
}

/// The bottom-right cell of the fixed-size chart block anchored at
/// `top_left`.
pub fn anchor_extent(top_left: CellRef) -> CellRef {
    CellRef::new(
        top_left.col + ANCHOR_COLUMNS - 1,
        top_left.row + ANCHOR_ROWS - 1,
    )
}

/// The series reference a chart stores, e.g. `Sheet1!$A$1:$B$10`.
pub fn series_reference(sheet_name: &str, data_range: &CellRange) -> String {
    format!(
        "{}!${}${}:${}${}",
        sheet_name,
        crate::range::column_number_to_name(data_range.start.col),
        data_range.start.row,
        crate::range::column_number_to_name(data_range.end.col),
        data_range.end.row,
    )
}
