//! # stock-widget
//!
//! Builds a stock ticker widget and prints it as HTML or as a JSON snapshot.
//! With `--enrich` the indicator is resolved against the sentiment service
//! before printing.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use lib_ticker::loggers;
use lib_ticker::markets::sentiment::{HttpSentimentSource, DEFAULT_SENTIMENT_URL};
use lib_ticker::widget::IndicatorState;
use lib_ticker::{Enrichment, WidgetFactory};
use std::path::PathBuf;
use std::time::Duration;

mod ticker_logic;
use ticker_logic::config::{self, Config};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

/// CLI arguments for stock-widget.
#[derive(Parser, Debug)]
#[clap(
    name = "stock-widget",
    version = "0.1.0",
    author = "ckir",
    about = "Renders a stock ticker widget.",
    long_about = "Builds the inline widget for SYMBOL (and optional company NAME) and prints it. \
                  With --enrich the indicator is filled from the sentiment service first."
)]
struct Cli {
    /// Ticker symbol, e.g. AAPL.
    symbol: String,

    /// Company name shown before the symbol.
    name: Option<String>,

    /// Look up the sentiment for the indicator.
    #[clap(long)]
    enrich: bool,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.clone());

    let log_dir = config.log_dir.clone().unwrap_or_else(|| PathBuf::from("./logs"));
    loggers::setup_logging(&log_dir, config.log_level.as_deref().unwrap_or("info"), "stock-widget")?;

    let timeout = Duration::from_millis(config.sentiment_timeout_ms.unwrap_or(10_000));
    let enrichment = if cli.enrich {
        let url = config.sentiment_url.as_deref().unwrap_or(DEFAULT_SENTIMENT_URL);
        log::info!("Sentiment enrichment enabled against {}", url);
        Enrichment::with_source(HttpSentimentSource::new(url, timeout)?)
    } else {
        Enrichment::Disabled
    };

    let factory = WidgetFactory::new(enrichment);
    let (container, widget) = factory.stock(&cli.symbol, cli.name.as_deref());

    if factory.enrichment().is_enabled() {
        // The request timeout already bounds the lookup; this guards the task itself.
        match tokio::time::timeout(timeout + Duration::from_secs(1), widget.indicator().settled()).await {
            Ok(ind) if ind.state() == IndicatorState::Fail => {
                log::warn!("Sentiment lookup for {} failed", widget.symbol());
            }
            Ok(_) => {}
            Err(_) => log::warn!("Sentiment lookup for {} did not settle in time", widget.symbol()),
        }
    }

    match cli.format {
        OutputFormat::Html => println!("{}", container.render_html()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&widget.snapshot())?),
    }

    Ok(())
}
