use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sbom_uploader::cli::Cli;
use sbom_uploader::config::UploaderConfig;
use sbom_uploader::exit::{exit_code_for, EXIT_FAILED};
use sbom_uploader::output;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("❌ sbom-upload error: {error:#}");
            ExitCode::from(EXIT_FAILED)
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = UploaderConfig::load_with_dotenv(cli.config.as_deref(), &cli.overrides())
        .context("failed to load configuration")?;
    tracing::debug!(?config, "resolved configuration");

    if cli.dry_run {
        let prepared = sbom_uploader::prepare(&config).await?;
        println!("{}", output::render_dry_run(&prepared, cli.format));
        return Ok(ExitCode::SUCCESS);
    }

    let result = sbom_uploader::upload(&config).await;
    let code = exit_code_for(&result);
    let outcome = result?;
    println!("{}", output::render_outcome(&outcome, cli.format));

    Ok(ExitCode::from(code))
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SBOM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
