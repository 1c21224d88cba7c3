//! # Financial Market APIs Module
//!
//! Concrete data providers behind the widget and the quote tooling.
//!
//! ## Contained Modules:
//!
//! - **`sentiment`**: an HTTP `SentimentSource` that reads the `#sentiment`
//!   element out of an HTML fragment. Plugged into `WidgetFactory` through
//!   `Enrichment::Enabled`.
//!
//! - **`yahoo`**: the Yahoo quote column catalogue and a CSV quote client that
//!   repairs numeric columns the server emits with unquoted thousands separators.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// HTTP sentiment lookups for widget enrichment.
pub mod sentiment;
/// Yahoo CSV quotes.
pub mod yahoo;
