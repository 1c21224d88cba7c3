//! # grab-quotes
//!
//! Downloads quote rows for one or more symbols from the CSV quote service
//! and prints them as JSON. `--probe` instead requests every column on its
//! own and lists the columns whose values split into several CSV fields.

use anyhow::{Context, Result};
use clap::Parser;
use lib_ticker::loggers;
use lib_ticker::markets::yahoo::{QuoteClient, DEFAULT_QUOTES_URL};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod ticker_logic;
use ticker_logic::config::{self, Config};

/// CLI arguments for grab-quotes.
#[derive(Parser, Debug)]
#[clap(
    name = "grab-quotes",
    version = "0.1.0",
    author = "ckir",
    about = "Fetches delimited stock quotes as JSON.",
    long_about = "Requests the named columns (all when omitted) for each SYMBOL and prints one JSON \
                  object per symbol. Columns with comma-formatted numbers are reassembled."
)]
struct Cli {
    /// Ticker symbols.
    #[clap(required = true)]
    symbols: Vec<String>,

    /// Comma separated column names, e.g. Symbol,LastTradePriceOnly.
    #[clap(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Report columns that do not come back as a single field.
    #[clap(long)]
    probe: bool,

    /// Output minified JSON instead of pretty-printed.
    #[clap(long)]
    minify: bool,

    #[command(flatten)]
    config: Config,
}

fn to_json<T: serde::Serialize>(value: &T, minify: bool) -> Result<String> {
    Ok(if minify {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.clone());

    let log_dir = config.log_dir.clone().unwrap_or_else(|| PathBuf::from("./logs"));
    loggers::setup_logging(&log_dir, config.log_level.as_deref().unwrap_or("info"), "grab-quotes")?;

    let base_url = config.quotes_url.as_deref().unwrap_or(DEFAULT_QUOTES_URL);
    let client = QuoteClient::new(base_url, config.quotes_retries.unwrap_or(3), None)
        .with_context(|| format!("invalid quote service URL {}", base_url))?;

    if cli.probe {
        let mut report = BTreeMap::new();
        for symbol in &cli.symbols {
            let probes = client.probe_columns(symbol, &cli.columns).await?;
            log::info!("{}: {} column(s) split into several fields", symbol, probes.len());
            report.insert(symbol.clone(), probes);
        }
        println!("{}", to_json(&report, cli.minify)?);
        return Ok(());
    }

    let rows = client.get_csv(&cli.symbols, &cli.columns).await?;
    log::info!("Fetched {} quote row(s)", rows.len());
    println!("{}", to_json(&rows, cli.minify)?);

    Ok(())
}
