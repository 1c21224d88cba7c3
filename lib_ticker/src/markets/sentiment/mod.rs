//! # Sentiment Service Integration
//!
//! - **`apicallsentiment`**: `HttpSentimentSource`, a single-attempt GET
//!   against the sentiment endpoint with the symbol as query parameter.
//! - **`fragment`**: extraction of label and category from the HTML response.

/// HTTP client implementing `SentimentSource`.
pub mod apicallsentiment;
/// HTML fragment parsing.
pub mod fragment;

pub use apicallsentiment::{HttpSentimentSource, DEFAULT_SENTIMENT_URL};
pub use fragment::parse_sentiment;
