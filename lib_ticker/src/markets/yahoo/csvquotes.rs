//! # Yahoo CSV Quote Client
//!
//! Requests `d/quotes.csv?s=<symbols>&f=<codes>` and parses the rows locally.
//!
//! ## Problem columns
//! `SharesFloat` and `SharesOutstanding` come back as numbers with unquoted
//! thousands separators, so one value spans several CSV fields. Those
//! columns are always requested last; everything after the regular columns
//! is regrouped, a new value starting at each field with a leading space,
//! and the pieces of each group are concatenated.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::columns;
use crate::retrieve::ky_http::{ApiClient, RetrieveError, DEFAULT_MAX_RETRIES};

/// Host the CSV endpoint lived on.
pub const DEFAULT_QUOTES_URL: &str = "http://download.finance.yahoo.com/";

/// Path of the CSV endpoint below the base URL.
const QUOTES_PATH: &str = "d/quotes.csv";

/// One symbol's values keyed by column name.
pub type QuoteRow = BTreeMap<String, String>;

/// Errors from [`QuoteClient`] and [`parse_quote_rows`].
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The request could not be built or sent.
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    /// The endpoint answered with a non-2xx status.
    #[error("quote service returned HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The body is not valid CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A requested column is not in the catalogue.
    #[error("unknown quote column: {0}")]
    UnknownColumn(String),

    /// No symbols were given.
    #[error("no symbols requested")]
    NoSymbols,

    /// A row has fewer fields than requested columns.
    #[error("row {row}: expected at least {expected} fields, found {found}")]
    ShortRow {
        /// Zero-based row index.
        row: usize,
        /// Number of requested columns.
        expected: usize,
        /// Fields present.
        found: usize,
    },

    /// The surplus fields did not regroup into the problem columns.
    #[error("row {row}: expected {expected} problem column values, reassembled {found}")]
    ProblemColumnMismatch {
        /// Zero-based row index.
        row: usize,
        /// Number of problem columns requested.
        expected: usize,
        /// Number of groups found.
        found: usize,
    },
}

/// Result of requesting a single column on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProbe {
    /// Column name.
    pub column: &'static str,
    /// Fields the response split into.
    pub fields: Vec<String>,
}

/// Breaks `items` into groups, starting a new group before every item for
/// which `pred` is true. A leading match does not produce an empty group,
/// and an empty input yields no groups.
pub fn buffer_flush<T, I, F>(items: I, pred: F) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> bool,
{
    let mut groups = Vec::new();
    let mut buf = Vec::new();
    for item in items {
        if pred(&item) && !buf.is_empty() {
            groups.push(std::mem::take(&mut buf));
        }
        buf.push(item);
    }
    if !buf.is_empty() {
        groups.push(buf);
    }
    groups
}

/// Splits requested column names into `(regular, problem)`, validating them
/// against the catalogue. An empty request means every column.
fn split_columns<S: AsRef<str>>(requested: &[S]) -> Result<(Vec<&'static str>, Vec<&'static str>), QuoteError> {
    let names: Vec<&'static str> = if requested.is_empty() {
        columns::all_names()
    } else {
        requested
            .iter()
            .map(|c| columns::lookup(c.as_ref()).ok_or_else(|| QuoteError::UnknownColumn(c.as_ref().to_string())))
            .collect::<Result<_, _>>()?
    };

    Ok(names.into_iter().partition(|n| !columns::is_problem(n)))
}

fn format_codes(names: &[&'static str]) -> String {
    names.iter().filter_map(|n| columns::code_for(n)).collect()
}

/// Parses a `quotes.csv` body whose fields are `regular` columns followed by
/// `problem` columns.
pub fn parse_quote_rows(text: &str, regular: &[&str], problem: &[&str]) -> Result<Vec<QuoteRow>, QuoteError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let expected = regular.len() + problem.len();
    let mut rows = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();
        if fields.len() < expected {
            return Err(QuoteError::ShortRow {
                row: index,
                expected,
                found: fields.len(),
            });
        }

        let (regular_data, surplus) = fields.split_at(regular.len());
        let rejoined: Vec<String> = buffer_flush(surplus.iter().copied(), |f| f.starts_with(' '))
            .into_iter()
            .map(|group| group.concat())
            .collect();
        if rejoined.len() != problem.len() {
            return Err(QuoteError::ProblemColumnMismatch {
                row: index,
                expected: problem.len(),
                found: rejoined.len(),
            });
        }

        let mut row = QuoteRow::new();
        for (name, value) in regular.iter().zip(regular_data) {
            row.insert(name.to_string(), value.to_string());
        }
        for (name, value) in problem.iter().zip(rejoined) {
            row.insert(name.to_string(), value);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Client for the Yahoo CSV quote endpoint.
#[derive(Clone)]
pub struct QuoteClient {
    client: ApiClient,
}

impl QuoteClient {
    /// A client rooted at `base_url` (see [`DEFAULT_QUOTES_URL`]).
    pub fn new(base_url: &str, max_retries: u32, timeout: Option<Duration>) -> Result<Self, RetrieveError> {
        Ok(Self {
            client: ApiClient::new(base_url, max_retries, timeout)?,
        })
    }

    /// A client for the default endpoint with the default retry count.
    pub fn with_defaults() -> Result<Self, RetrieveError> {
        Self::new(DEFAULT_QUOTES_URL, DEFAULT_MAX_RETRIES, None)
    }

    async fn fetch(&self, symbols: &str, codes: &str) -> Result<String, QuoteError> {
        let response = self
            .client
            .get_text(QUOTES_PATH, &[("s", symbols), ("f", codes)])
            .await?;

        if !response.success {
            log::warn!(
                "Quote request for {} failed with HTTP {}: {}",
                symbols,
                response.status,
                response.error_body.as_deref().unwrap_or("")
            );
            return Err(QuoteError::Status {
                status: response.status,
            });
        }

        Ok(response.data.unwrap_or_default())
    }

    /// Fetches `columns` (all when empty) for `symbols`, one row per symbol.
    pub async fn get_csv<S: AsRef<str>, C: AsRef<str>>(
        &self,
        symbols: &[S],
        columns: &[C],
    ) -> Result<Vec<QuoteRow>, QuoteError> {
        if symbols.is_empty() {
            return Err(QuoteError::NoSymbols);
        }
        let (regular, problem) = split_columns(columns)?;

        let ordered: Vec<&'static str> = regular.iter().chain(problem.iter()).copied().collect();
        let symbol_list = symbols.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");

        let body = self.fetch(&symbol_list, &format_codes(&ordered)).await?;
        let rows = parse_quote_rows(&body, &regular, &problem)?;
        log::debug!("Parsed {} quote rows for {}", rows.len(), symbol_list);
        Ok(rows)
    }

    /// Requests each column alone for `symbol` and returns the ones whose
    /// response does not split into exactly one field. `columns` empty means
    /// the whole catalogue.
    pub async fn probe_columns<C: AsRef<str>>(&self, symbol: &str, columns: &[C]) -> Result<Vec<ColumnProbe>, QuoteError> {
        let (regular, problem) = split_columns(columns)?;
        let mut suspicious = Vec::new();

        for column in regular.into_iter().chain(problem) {
            let body = self.fetch(symbol, &format_codes(&[column])).await?;
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(body.as_bytes());

            let mut records = 0;
            for record in reader.records() {
                let record = record?;
                records += 1;
                if record.len() != 1 {
                    suspicious.push(ColumnProbe {
                        column,
                        fields: record.iter().map(str::to_string).collect(),
                    });
                }
            }

            // A blank body has no records at all, which is zero fields.
            if records == 0 {
                suspicious.push(ColumnProbe { column, fields: Vec::new() });
            }
        }

        Ok(suspicious)
    }
}
