//! Fraud Insights - Main Entry Point
//!
//! Analyzes an uploaded transaction file and prints the result as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use fraud_insights::{config::AppConfig, AnalysisSession};
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "fraud-insights", version, about = "Analyze a transaction file for fraud")]
struct Cli {
    /// Transaction file to analyze
    file: PathBuf,

    /// Configuration file (defaults to config/config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Include chart data in the output
    #[arg(long)]
    charts: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
        tracing_subscriber::EnvFilter::try_new(format!("fraud_insights={}", config.logging.level))
    })?;

    // Logs go to stderr so stdout carries only the result
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    init_logging(&config)?;

    info!("Starting Fraud Insights");
    info!(
        max_upload_bytes = config.upload.max_upload_bytes,
        class_column = %config.analysis.class_column,
        seed = config.simulation.seed,
        "Configuration loaded"
    );

    let mut session = AnalysisSession::new(&config);
    let output = match session.submit_file(&cli.file).await {
        Ok(output) => output,
        Err(e) => {
            error!(kind = ?e.kind(), error = %e, file = %cli.file.display(), "Analysis failed");
            let failure = json!({ "error": { "kind": e.kind(), "message": e.to_string() } });
            println!("{}", failure);
            std::process::exit(1);
        }
    };

    let body = if cli.charts {
        json!({ "result": output.result, "charts": output.charts })
    } else {
        serde_json::to_value(&output.result).context("Failed to serialize result")?
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{}", rendered);

    Ok(())
}
