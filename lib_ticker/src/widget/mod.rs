//! # Stock Widget Module
//!
//! Renders a small inline stock ticker: the symbol (or "name (symbol)") text
//! followed by an indicator sub-node that an optional sentiment lookup fills in.
//!
//! ## Contained Modules:
//!
//! - **`factory`**: `WidgetFactory`, the pure `build_widget` builder and the
//!   `stock` convenience constructor.
//! - **`container`**: the DOM-equivalent node widgets are mounted into, and its
//!   HTML rendering.
//! - **`indicator`**: indicator state and the shared handle the enrichment task
//!   resolves.
//! - **`enrichment`**: the `SentimentSource` strategy and its error type.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

/// Factory, builder and convenience constructor.
pub mod factory;
/// DOM-equivalent container and HTML rendering.
pub mod container;
/// Indicator state machine and handles.
pub mod indicator;
/// Enrichment strategy and errors.
pub mod enrichment;

pub use container::{escape_html, Container, Node};
pub use enrichment::{EnrichError, Enrichment, Sentiment, SentimentSource};
pub use factory::{build_widget, display_text, stock, StockWidget, WidgetFactory, WidgetMetadata, WidgetSnapshot, STOCK_CLASS};
pub use indicator::{Indicator, IndicatorHandle, IndicatorSnapshot, IndicatorState, WeakIndicator};
