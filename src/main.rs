use clap::Parser;
use excel_mcp_server::{CliArgs, ServerConfig, init_logging, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = CliArgs::parse();
    let config = ServerConfig::from_args(cli)?;

    run_server(config).await
}
