//! Logging setup. Output always goes to stderr so the stdio transport's
//! protocol stream stays clean.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. `EXCEL_MCP_LOG` takes precedence over
/// `RUST_LOG`; both absent means `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("EXCEL_MCP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
