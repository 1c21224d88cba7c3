//! # Yahoo Quotes
//!
//! - **`columns`**: the column catalogue (`name -> format code`) and the
//!   columns known to arrive with unquoted thousands separators.
//! - **`csvquotes`**: `QuoteClient`, which downloads `quotes.csv`, parses it
//!   locally and reassembles the broken numeric columns.

/// Column catalogue.
pub mod columns;
/// CSV quote client.
pub mod csvquotes;

pub use csvquotes::{buffer_flush, parse_quote_rows, ColumnProbe, QuoteClient, QuoteError, QuoteRow, DEFAULT_QUOTES_URL};
