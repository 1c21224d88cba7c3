//! # lib_ticker
//!
//! Stock ticker widgets and the market-data clients that feed them.
//!
//! Modules are gated by folder, one Cargo feature each:
//!
//! - **`widget`**: the widget factory, its DOM-equivalent container and the
//!   asynchronous indicator enrichment contract.
//! - **`retrieve`**: a `reqwest` client wrapper with retry middleware.
//! - **`markets`**: concrete data sources (HTTP sentiment lookups, Yahoo CSV quotes).
//! - **`loggers`**: `log` + `fern` setup with file rotation.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

#[cfg(feature = "widget")]
pub mod widget;

#[cfg(feature = "retrieve")]
pub mod retrieve;

#[cfg(feature = "markets")]
pub mod markets;

#[cfg(feature = "loggers")]
pub mod loggers;

#[cfg(feature = "widget")]
pub use widget::{build_widget, stock, Container, Enrichment, StockWidget, WidgetFactory};
