//! # countryline entry point

use anyhow::Result;
use countryline::cmd_args::CommandLineArgs;
use countryline::config::AppConfig;
use countryline::repl::io::{TerminalEventStream, TerminalRenderStream};
use countryline::{logging, AppController};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    logging::init(cmd_args.verbose())?;

    let config = AppConfig::load(&cmd_args)?;
    tracing::info!("Using country API at {}", config.base_url);

    let mut app = AppController::with_io_streams(
        &config,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await
}
