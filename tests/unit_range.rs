use assert_matches::assert_matches;

use excel_mcp_server::ExcelError;
use excel_mcp_server::range::{CellRange, CellRef, cell_address, column_number_to_name};

#[test]
fn column_name_and_cell_address_round_trip() {
    assert_eq!(column_number_to_name(1), "A");
    assert_eq!(column_number_to_name(26), "Z");
    assert_eq!(column_number_to_name(27), "AA");
    assert_eq!(column_number_to_name(702), "ZZ");
    assert_eq!(cell_address(1, 1), "A1");
    assert_eq!(cell_address(28, 42), "AB42");
}

#[test]
fn parses_simple_cells() {
    assert_eq!(CellRef::parse("A1").unwrap(), CellRef::new(1, 1));
    assert_eq!(CellRef::parse("B5").unwrap(), CellRef::new(2, 5));
    assert_eq!(CellRef::parse("AB42").unwrap(), CellRef::new(28, 42));
}

#[test]
fn tolerates_lowercase_and_absolute_markers() {
    assert_eq!(CellRef::parse("b5").unwrap(), CellRef::new(2, 5));
    assert_eq!(CellRef::parse("$B$5").unwrap(), CellRef::new(2, 5));
    assert_eq!(CellRef::parse(" B5 ").unwrap(), CellRef::new(2, 5));
}

#[test]
fn rejects_malformed_cells() {
    assert_matches!(CellRef::parse("1A"), Err(ExcelError::InvalidCell { .. }));
    assert_matches!(CellRef::parse(""), Err(ExcelError::InvalidCell { .. }));
    assert_matches!(CellRef::parse("A1:B2"), Err(ExcelError::InvalidCell { .. }));
    assert_matches!(CellRef::parse("A0"), Err(ExcelError::InvalidCell { .. }));
}

#[test]
fn parses_rectangular_ranges() {
    let range = CellRange::parse("A1:D10").unwrap();
    assert_eq!(range.start, CellRef::new(1, 1));
    assert_eq!(range.end, CellRef::new(4, 10));
    assert_eq!(range.rows(), 10);
    assert_eq!(range.columns(), 4);
    assert_eq!(range.to_string(), "A1:D10");
}

#[test]
fn bare_cell_is_degenerate_range() {
    let range = CellRange::parse("B5").unwrap();
    assert!(range.is_single_cell());
    assert_eq!(range.rows(), 1);
    assert_eq!(range.columns(), 1);
    assert_eq!(range.to_string(), "B5");
}

#[test]
fn rejects_inverted_ranges() {
    assert_matches!(
        CellRange::parse("D10:A1"),
        Err(ExcelError::InvalidRange { .. })
    );
    assert_matches!(
        CellRange::parse("A10:A1"),
        Err(ExcelError::InvalidRange { .. })
    );
    assert_matches!(
        CellRange::parse("D1:A1"),
        Err(ExcelError::InvalidRange { .. })
    );
}

#[test]
fn rejects_malformed_ranges() {
    assert_matches!(CellRange::parse(""), Err(ExcelError::InvalidRange { .. }));
    assert_matches!(
        CellRange::parse("A1:B2:C3"),
        Err(ExcelError::InvalidRange { .. })
    );
    assert_matches!(
        CellRange::parse("A1:"),
        Err(ExcelError::InvalidRange { .. })
    );
    assert_matches!(
        CellRange::parse("nope"),
        Err(ExcelError::InvalidRange { .. })
    );
}

#[test]
fn range_cell_count_matches_dimensions() {
    for (text, cells) in [("A1:A1", 1), ("A1:B2", 4), ("C3:E7", 15)] {
        let range = CellRange::parse(text).unwrap();
        assert_eq!(range.rows() * range.columns(), cells, "{text}");
    }
}
