use std::path::{Path, PathBuf};

use excel_mcp_server::{CliArgs, ServerConfig, TransportKind};

#[test]
fn defaults_are_stdio_in_the_current_directory() {
    let config = ServerConfig::from_args(CliArgs::default()).unwrap();
    assert_eq!(config.workspace_root, PathBuf::from("."));
    assert_eq!(config.transport, TransportKind::Stdio);
    assert!(config.enabled_tools.is_none());
    assert!(config.is_tool_enabled("read_excel_file"));
}

#[test]
fn enabled_tools_gate_is_case_insensitive_and_trims_empties() {
    let args = CliArgs {
        enabled_tools: Some(vec!["Read_Excel_File".into(), String::new()]),
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).unwrap();
    assert!(config.is_tool_enabled("read_excel_file"));
    assert!(config.is_tool_enabled("READ_EXCEL_FILE"));
    assert!(!config.is_tool_enabled("write_excel_file"));
}

#[test]
fn relative_paths_resolve_under_the_workspace_root() {
    let args = CliArgs {
        workspace_root: Some(PathBuf::from("/data")),
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).unwrap();
    assert_eq!(config.resolve_path("book.xlsx"), Path::new("/data/book.xlsx"));
    assert_eq!(
        config.resolve_path("/abs/book.xlsx"),
        Path::new("/abs/book.xlsx")
    );
}

#[test]
fn config_file_values_sit_under_cli_values() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("server.yaml");
    std::fs::write(
        &config_path,
        "workspace_root: /from-file\ntransport: http\nhttp_bind: 127.0.0.1:9001\n",
    )
    .unwrap();

    let args = CliArgs {
        config: Some(config_path.clone()),
        workspace_root: Some(PathBuf::from("/from-cli")),
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).unwrap();
    assert_eq!(config.workspace_root, PathBuf::from("/from-cli"));
    assert_eq!(config.transport, TransportKind::Http);
    assert_eq!(config.http_bind_address, "127.0.0.1:9001".parse().unwrap());
}

#[test]
fn unsupported_config_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("server.toml");
    std::fs::write(&config_path, "transport = 'http'").unwrap();

    let args = CliArgs {
        config: Some(config_path),
        ..CliArgs::default()
    };
    assert!(ServerConfig::from_args(args).is_err());
}
