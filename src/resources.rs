//! Static MCP resources: server help and worked tool examples.

use rmcp::model::{AnnotateAble, Annotated, RawResource, ResourceContents};

pub const HELP_URI: &str = "excel://help";
pub const EXAMPLES_URI: &str = "excel://examples";

const HELP_TEXT: &str = "\
Excel MCP Server Help

This server manipulates Excel (.xlsx) workbooks through MCP tools.

Available tools:
1. read_excel_file   - Read cell values from a worksheet range
2. write_excel_file  - Write rows of data, creating the file if needed
3. get_worksheet_info - List worksheets with their used extents
4. add_worksheet     - Append a new empty worksheet
5. update_cell       - Set a single cell's value or formula
6. apply_formula     - Store a formula in a cell
7. format_cells      - Apply font, fill, border, and alignment options
8. create_chart      - Insert a line, bar, pie, or scatter chart

Notes:
- Relative file paths resolve under the server's workspace root.
- Formulas are stored, never evaluated; reads return the literal
  formula text (e.g. \"=A1+B1\").
- Ranges use A1 notation (e.g. A1:D10). A bare cell like B5 is a
  single-cell range.

For worked examples, read the excel://examples resource.
";

const EXAMPLES_TEXT: &str = r#"Excel MCP Server Examples

1. Reading a range:
   Tool: read_excel_file
   Arguments: {"file_path": "data.xlsx", "sheet_name": "Sheet1", "range": "A1:C10"}

2. Writing rows with headers:
   Tool: write_excel_file
   Arguments: {
     "file_path": "output.xlsx",
     "data": [["John", 30, "New York"], ["Jane", 25, "Boston"]],
     "headers": ["Name", "Age", "City"]
   }

3. Adding a worksheet:
   Tool: add_worksheet
   Arguments: {"file_path": "workbook.xlsx", "sheet_name": "NewSheet"}

4. Updating a cell:
   Tool: update_cell
   Arguments: {"file_path": "data.xlsx", "sheet_name": "Sheet1", "cell": "A1", "value": "Updated Value"}

5. Applying a formula:
   Tool: apply_formula
   Arguments: {"file_path": "calc.xlsx", "sheet_name": "Sheet1", "cell": "C1", "formula": "=A1+B1"}

   Cross-sheet reference:
   Arguments: {"file_path": "calc.xlsx", "sheet_name": "Summary", "cell": "A1", "formula": "=SUM(Data!D:D)"}

6. Formatting cells:
   Tool: format_cells
   Arguments: {
     "file_path": "styled.xlsx",
     "sheet_name": "Sheet1",
     "range": "A1:C1",
     "format_options": {"bold": true, "font_size": 14, "background_color": "yellow"}
   }

7. Creating a chart:
   Tool: create_chart
   Arguments: {
     "file_path": "charts.xlsx",
     "sheet_name": "Data",
     "data_range": "A1:B10",
     "chart_type": "line",
     "title": "Sales Trend"
   }
"#;

/// The static list served to `resources/list`.
pub fn resource_list() -> Vec<Annotated<RawResource>> {
    let mut help = RawResource::new(HELP_URI, "help");
    help.description = Some("Help documentation for the Excel MCP server".into());
    help.mime_type = Some("text/plain".into());

    let mut examples = RawResource::new(EXAMPLES_URI, "examples");
    examples.description = Some("Worked tool invocation examples".into());
    examples.mime_type = Some("text/plain".into());

    vec![help.no_annotation(), examples.no_annotation()]
}

/// Content for `resources/read`, or `None` for an unknown URI.
pub fn read(uri: &str) -> Option<ResourceContents> {
    let text = match uri {
        HELP_URI => HELP_TEXT,
        EXAMPLES_URI => EXAMPLES_TEXT,
        _ => return None,
    };
    Some(ResourceContents::text(text, uri))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_list_has_expected_entries() {
        let resources = resource_list();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].raw.uri, HELP_URI);
        assert_eq!(resources[0].raw.name, "help");
        assert_eq!(resources[1].raw.uri, EXAMPLES_URI);
        assert_eq!(resources[1].raw.name, "examples");
    }

    #[test]
    fn help_mentions_every_tool() {
        for tool in [
            "read_excel_file",
            "write_excel_file",
            "get_worksheet_info",
            "add_worksheet",
            "update_cell",
            "apply_formula",
            "format_cells",
            "create_chart",
        ] {
            assert!(HELP_TEXT.contains(tool), "missing {tool}");
        }
    }

    #[test]
    fn unknown_uri_reads_nothing() {
        assert!(read("excel://nope").is_none());
    }
}
