//! # Sentiment API Client
//!
//! A [`SentimentSource`] backed by an HTTP endpoint that answers
//! `GET <endpoint>?symbol=<SYMBOL>` with an HTML fragment containing an
//! element with id `sentiment`.
//!
//! ## Behaviour:
//! - **Single attempt**: the underlying `ApiClient` is built with zero
//!   retries; a widget issues at most one request.
//! - **Bounded wait**: every request carries a timeout, so a stalled service
//!   ends in `Fail` rather than a permanent `Loading`.
//! - **Failure mapping**: transport errors become `EnrichError::Request`,
//!   non-2xx statuses `EnrichError::Status`, bodies without the element
//!   `EnrichError::MissingSentiment`.

use std::time::Duration;

use async_trait::async_trait;

use super::fragment::parse_sentiment;
use crate::retrieve::ky_http::{ApiClient, RetrieveError};
use crate::widget::enrichment::{EnrichError, Sentiment, SentimentSource};

/// Endpoint the widget was originally written against.
pub const DEFAULT_SENTIMENT_URL: &str = "http://insights.themarketiq.com/chart/";

/// Default request timeout.
pub const DEFAULT_SENTIMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-backed sentiment lookups.
#[derive(Clone)]
pub struct HttpSentimentSource {
    /// Client rooted at the sentiment endpoint.
    client: ApiClient,
}

impl HttpSentimentSource {
    /// Creates a source for `endpoint` with the given request timeout.
    ///
    /// # Errors
    /// Fails if `endpoint` is not an absolute URL or the HTTP client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RetrieveError> {
        Ok(Self {
            client: ApiClient::new(endpoint, 0, Some(timeout))?,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.client.base_url().as_str()
    }
}

#[async_trait]
impl SentimentSource for HttpSentimentSource {
    async fn lookup(&self, symbol: &str) -> Result<Sentiment, EnrichError> {
        let response = self
            .client
            .get_text("", &[("symbol", symbol)])
            .await
            .map_err(|e| EnrichError::Request(Box::new(e)))?;

        if !response.success {
            return Err(EnrichError::Status {
                status: response.status,
            });
        }

        let body = response.data.unwrap_or_default();
        parse_sentiment(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieve::ky_http::tests::{closed_port_url, serve_once};
    use crate::widget::{Enrichment, IndicatorState, WidgetFactory};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_lookup_success_sends_symbol() {
        let (base, handle) = serve_once("200 OK", r#"<div id="sentiment" class="positive">Bullish</div>"#);
        let source = HttpSentimentSource::new(&base, TIMEOUT).unwrap();

        let sentiment = source.lookup("AAPL").await.unwrap();
        let request = handle.join().unwrap();

        assert_eq!(sentiment.label, "Bullish");
        assert_eq!(sentiment.category.as_deref(), Some("positive"));
        assert!(request.starts_with("GET /?symbol=AAPL "));
    }

    #[tokio::test]
    async fn test_lookup_non_2xx_is_status_error() {
        let (base, handle) = serve_once("500 Internal Server Error", "boom");
        let source = HttpSentimentSource::new(&base, TIMEOUT).unwrap();

        let res = source.lookup("AAPL").await;
        handle.join().unwrap();
        assert!(matches!(res, Err(EnrichError::Status { status: 500 })));
    }

    #[tokio::test]
    async fn test_lookup_network_failure_is_request_error() {
        let source = HttpSentimentSource::new(&closed_port_url(), TIMEOUT).unwrap();
        let res = source.lookup("AAPL").await;
        assert!(matches!(res, Err(EnrichError::Request(_))));
    }

    #[tokio::test]
    async fn test_widget_enriched_from_simulated_service() {
        let (base, handle) = serve_once("200 OK", r#"<div id="sentiment" class="positive">Bullish</div>"#);
        let factory = WidgetFactory::new(Enrichment::with_source(HttpSentimentSource::new(&base, TIMEOUT).unwrap()));

        let (container, widget) = factory.stock("AAPL", None);
        let ind = widget.indicator().settled().await;
        handle.join().unwrap();

        assert_eq!(ind.state(), IndicatorState::Success);
        assert_eq!(ind.text(), "Bullish");
        assert!(ind.classes().contains(&"positive".to_string()));
        assert_eq!(
            container.render_html(),
            r#"<span class="stock" data-symbol="AAPL">AAPL <span class="ajax-success positive">Bullish</span></span>"#
        );
    }

    #[tokio::test]
    async fn test_widget_fails_on_network_failure() {
        let source = HttpSentimentSource::new(&closed_port_url(), TIMEOUT).unwrap();
        let factory = WidgetFactory::new(Enrichment::with_source(source));

        let widget = factory.create("AAPL", Some("Apple Inc."));
        let ind = widget.indicator().settled().await;

        assert_eq!(ind.state(), IndicatorState::Fail);
        assert_eq!(ind.text(), "");
        assert_eq!(ind.classes(), vec!["ajax-fail"]);
        assert_eq!(widget.text(), "Apple Inc. (AAPL)");
    }

    #[tokio::test]
    async fn test_widget_fails_when_element_missing() {
        let (base, handle) = serve_once("200 OK", "<p>maintenance</p>");
        let factory = WidgetFactory::new(Enrichment::with_source(HttpSentimentSource::new(&base, TIMEOUT).unwrap()));

        let widget = factory.create("AAPL", None);
        let ind = widget.indicator().settled().await;
        handle.join().unwrap();

        assert_eq!(ind.state(), IndicatorState::Fail);
    }
}
