mod cli;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = apod::ApodConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Collect(args) => cli::collect(&config, &args)?,
        Commands::Render(args) => cli::render(&config, &args)?,
        Commands::Run { collect, render } => cli::run(&config, &collect, &render)?,
        Commands::Fetch { date, hd, image } => cli::fetch(&config, date, hd, image.as_deref())?,
        Commands::Peers => cli::peers(&config)?,
    }

    Ok(())
}
