//! # Stock Widget Factory
//!
//! Builds immutable [`StockWidget`] values, mounts them into containers and,
//! when enrichment is enabled, starts one sentiment lookup per widget.

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::container::Container;
use super::enrichment::Enrichment;
use super::indicator::{IndicatorHandle, IndicatorSnapshot};

/// Marker class carried by every mounted widget container.
pub const STOCK_CLASS: &str = "stock";

/// The data associated with a widget, exactly as passed to the factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetMetadata {
    /// Ticker symbol.
    pub symbol: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// `"{name} ({symbol})"` when a non-empty name is given, else `symbol`.
pub fn display_text(symbol: &str, name: Option<&str>) -> String {
    match name {
        Some(n) if !n.is_empty() => format!("{} ({})", n, symbol),
        _ => symbol.to_string(),
    }
}

/// A constructed widget. Text and metadata are fixed; only the indicator
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct StockWidget {
    metadata: WidgetMetadata,
    text: String,
    indicator: IndicatorHandle,
}

impl StockWidget {
    pub fn metadata(&self) -> &WidgetMetadata {
        &self.metadata
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// The display text computed at creation.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn indicator(&self) -> &IndicatorHandle {
        &self.indicator
    }

    /// Serializable view including the current indicator value.
    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            symbol: self.metadata.symbol.clone(),
            name: self.metadata.name.clone(),
            text: self.text.clone(),
            indicator: self.indicator.get().snapshot(),
        }
    }
}

/// JSON form of a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub text: String,
    pub indicator: IndicatorSnapshot,
}

/// Builds a widget with a `Disabled` indicator. No side effects.
///
/// An empty `symbol` is accepted and yields an empty label.
pub fn build_widget(symbol: &str, name: Option<&str>) -> StockWidget {
    StockWidget {
        metadata: WidgetMetadata {
            symbol: symbol.to_string(),
            name: name.map(str::to_string),
        },
        text: display_text(symbol, name),
        indicator: IndicatorHandle::new(),
    }
}

/// Creates widgets, optionally enriching them.
#[derive(Debug, Clone, Default)]
pub struct WidgetFactory {
    enrichment: Enrichment,
}

impl WidgetFactory {
    pub fn new(enrichment: Enrichment) -> Self {
        Self { enrichment }
    }

    pub fn enrichment(&self) -> &Enrichment {
        &self.enrichment
    }

    /// Builds a widget and starts its enrichment, if enabled.
    pub fn create(&self, symbol: &str, name: Option<&str>) -> StockWidget {
        let widget = build_widget(symbol, name);
        let _ = self.enrich_indicator(widget.indicator(), symbol);
        widget
    }

    /// Like [`WidgetFactory::create`], and mounts the widget into `container`,
    /// replacing whatever it held before.
    pub fn create_in(&self, container: &mut Container, symbol: &str, name: Option<&str>) -> StockWidget {
        let widget = build_widget(symbol, name);
        container.mount(&widget);
        let _ = self.enrich_indicator(widget.indicator(), symbol);
        widget
    }

    /// Allocates a fresh `span` and mounts a new widget into it.
    pub fn stock(&self, symbol: &str, name: Option<&str>) -> (Container, StockWidget) {
        let mut container = Container::span();
        let widget = self.create_in(&mut container, symbol, name);
        (container, widget)
    }

    /// Starts the single sentiment lookup for `indicator`.
    ///
    /// Returns `None` when enrichment is disabled, the indicator already left
    /// `Disabled`, or no Tokio runtime is available (the indicator then fails
    /// immediately). The returned task may be dropped; it runs detached.
    pub fn enrich_indicator(&self, indicator: &IndicatorHandle, symbol: &str) -> Option<JoinHandle<()>> {
        let source = match &self.enrichment {
            Enrichment::Disabled => return None,
            Enrichment::Enabled(source) => source.clone(),
        };

        if !indicator.begin_loading() {
            log::debug!("Indicator for {:?} is not idle; skipping sentiment lookup", symbol);
            return None;
        }

        let runtime = match Handle::try_current() {
            Ok(h) => h,
            Err(e) => {
                log::warn!("No async runtime for sentiment lookup of {:?}: {}", symbol, e);
                indicator.fail();
                return None;
            }
        };

        let weak = indicator.downgrade();
        let symbol = symbol.to_string();

        Some(runtime.spawn(async move {
            let outcome = source.lookup(&symbol).await;

            let Some(indicator) = weak.upgrade() else {
                log::debug!("Widget for {:?} dropped before sentiment resolved", symbol);
                return;
            };

            let applied = match &outcome {
                Ok(sentiment) => {
                    log::debug!(
                        "Sentiment for {:?} via {}: {:?}",
                        symbol,
                        source.name(),
                        sentiment
                    );
                    indicator.succeed(sentiment)
                }
                Err(e) => {
                    log::warn!("Sentiment lookup for {:?} via {} failed: {}", symbol, source.name(), e);
                    indicator.fail()
                }
            };

            if !applied {
                log::debug!("Indicator for {:?} was detached; sentiment discarded", symbol);
            }
        }))
    }
}

/// Convenience constructor: a fresh container holding a widget without
/// enrichment.
pub fn stock(symbol: &str, name: Option<&str>) -> Container {
    WidgetFactory::default().stock(symbol, name).0
}
