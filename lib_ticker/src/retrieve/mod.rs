//! # Data Retrieval Module
//!
//! Generic HTTP retrieval shared by every market client in this crate.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: An `ApiClient` built on `reqwest` and `reqwest-middleware`,
//!   with a configurable number of exponential-backoff retries. The sentiment
//!   source runs it with zero retries, the quote client with the default three.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Generic HTTP API client with retry middleware.
pub mod ky_http;

pub use ky_http::{ApiClient, ApiResponse, RetrieveError};
