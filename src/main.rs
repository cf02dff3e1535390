use anyhow::Result;
use clap::Parser;
use tracing::info;

use tuplemine::cli::Cli;
use tuplemine::config::Config;
use tuplemine::core::Engine;
use tuplemine::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref())?;

    // Initialize logging
    logging::init(&config.logging, cli.verbose)?;

    info!("Starting tuplemine v{}", env!("CARGO_PKG_VERSION"));

    let engine = Engine::new(config)?;

    cli.execute(engine)
}
