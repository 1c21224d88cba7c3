//! # Sentiment Enrichment
//!
//! Enrichment is an explicit capability injected into the factory. The
//! default is [`Enrichment::Disabled`], which leaves every indicator as an
//! inert placeholder. An enabled enrichment owns a [`SentimentSource`] and
//! issues exactly one lookup per widget.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The sentiment extracted for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Human-readable label, e.g. "Bullish".
    pub label: String,
    /// Category classes, e.g. "positive". May hold several space-separated classes.
    pub category: Option<String>,
}

/// Why a lookup failed. These never leave the widget; they only decide
/// the `Fail` transition and get logged.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// The request could not be sent or its body could not be read.
    #[error("sentiment request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered with a non-2xx status.
    #[error("sentiment service returned HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body has no element with id `sentiment`.
    #[error("response has no `#sentiment` element")]
    MissingSentiment,
}

/// A remote (or simulated) sentiment lookup.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Looks up the sentiment for `symbol`. Called at most once per widget.
    async fn lookup(&self, symbol: &str) -> Result<Sentiment, EnrichError>;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;
}

/// Whether widgets get a sentiment lookup.
#[derive(Clone, Default)]
pub enum Enrichment {
    /// No lookup; indicators stay `Disabled`.
    #[default]
    Disabled,
    /// One lookup per widget through the given source.
    Enabled(Arc<dyn SentimentSource>),
}

impl Enrichment {
    /// Wraps a concrete source.
    pub fn with_source<S: SentimentSource + 'static>(source: S) -> Self {
        Enrichment::Enabled(Arc::new(source))
    }

    /// True for [`Enrichment::Enabled`].
    pub fn is_enabled(&self) -> bool {
        matches!(self, Enrichment::Enabled(_))
    }
}

impl fmt::Debug for Enrichment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enrichment::Disabled => f.write_str("Disabled"),
            Enrichment::Enabled(source) => write!(f, "Enabled({})", source.name()),
        }
    }
}
