use std::path::Path;
use std::sync::Arc;

use rmcp::ServerHandler;
use rmcp::handler::server::wrapper::Parameters;

use excel_mcp_server::state::AppState;
use excel_mcp_server::tools::{GetWorksheetInfoParams, WriteExcelFileParams};
use excel_mcp_server::{CliArgs, ExcelServer, ServerConfig};

fn server_in(root: &Path, enabled_tools: Option<Vec<String>>) -> ExcelServer {
    let args = CliArgs {
        workspace_root: Some(root.to_path_buf()),
        enabled_tools,
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).unwrap();
    ExcelServer::from_state(Arc::new(AppState::new(Arc::new(config))))
}

#[test]
fn get_info_advertises_tools_and_resources() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(dir.path(), None);

    let info = server.get_info();
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
    let instructions = info.instructions.expect("instructions");
    assert!(instructions.contains("read_excel_file"));
    assert!(instructions.contains("A1 notation"));
}

#[tokio::test(flavor = "current_thread")]
async fn tool_handlers_return_json_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(dir.path(), None);

    let written = server
        .write_excel_file(Parameters(WriteExcelFileParams {
            file_path: "simple.xlsx".into(),
            data: serde_json::from_value(serde_json::json!([["Alpha", 10]])).unwrap(),
            sheet_name: None,
            headers: None,
        }))
        .await
        .expect("write tool")
        .0;
    assert_eq!(written.rows_written, 1);

    let info = server
        .get_worksheet_info(Parameters(GetWorksheetInfoParams {
            file_path: "simple.xlsx".into(),
        }))
        .await
        .expect("info tool")
        .0;
    assert_eq!(info.total_worksheets, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn disabled_tools_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(dir.path(), Some(vec!["read_excel_file".into()]));

    let error = server
        .get_worksheet_info(Parameters(GetWorksheetInfoParams {
            file_path: "simple.xlsx".into(),
        }))
        .await
        .map(drop)
        .expect_err("tool should be disabled");
    assert!(error.message.contains("disabled"));
}

#[tokio::test(flavor = "current_thread")]
async fn missing_file_surfaces_kind_in_message() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(dir.path(), None);

    let error = server
        .get_worksheet_info(Parameters(GetWorksheetInfoParams {
            file_path: "absent.xlsx".into(),
        }))
        .await
        .map(drop)
        .expect_err("file should be missing");
    assert!(error.message.contains("FileNotFound"));
    assert!(error.message.contains("absent.xlsx"));
}
