mod config;
mod platform;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A missing .env is normal; the process environment still applies.
    let _ = dotenvy::dotenv();

    let cli = config::Cli::parse();
    let config = config::AppConfig::from_cli(&cli)?;
    platform::logging::initialize(&config.log);

    platform::run_app(cli.command.unwrap_or_default(), config).await
}
