//
//  atlassian-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Atlassian collection endpoints
//!
//! Bitbucket Server and the Atlassian REST platform page collections with a
//! `start`/`limit` query pair. Each response carries the page's records, an
//! `isLastPage` flag and, when more pages exist, a `nextPageStart` cursor to
//! send back as `start` on the next request:
//!
//! ```json
//! {
//!     "size": 3,
//!     "limit": 3,
//!     "isLastPage": false,
//!     "values": [{"slug": "a"}, {"slug": "b"}, {"slug": "c"}],
//!     "start": 0,
//!     "nextPageStart": 3
//! }
//! ```
//!
//! [`Paginator::fetch_all`] walks such an endpoint to the end, or until a
//! caller-supplied cap is reached, and returns every record in server order.
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_api::api::AtlassianClient;
//! use atlassian_api::api::common::{PageQuery, Paginator};
//!
//! # async fn example() -> Result<(), atlassian_api::api::ApiError> {
//! let client = AtlassianClient::new("https://bitbucket.example.com")?;
//! let repos = Paginator::new(&client)
//!     .fetch_all("/rest/api/latest/projects/PROJ/repos", PageQuery::new().limit(50))
//!     .await?;
//! println!("{} repositories", repos.len());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, Instrument, Span};

use super::{ApiError, Payload, Record};

/// Opaque continuation token returned by the server as `nextPageStart`.
///
/// Bitbucket sends an integer offset, other endpoints may send a string. The
/// fetcher never interprets the value; it is echoed back verbatim as the
/// `start` query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(Value);

impl Cursor {
    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for Cursor {
    /// Renders the cursor as a query-string value.
    ///
    /// Strings are written without quotes, everything else as JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<u64> for Cursor {
    fn from(start: u64) -> Self {
        Self(Value::from(start))
    }
}

impl From<i64> for Cursor {
    fn from(start: i64) -> Self {
        Self(Value::from(start))
    }
}

impl From<&str> for Cursor {
    fn from(start: &str) -> Self {
        Self(Value::from(start))
    }
}

impl From<String> for Cursor {
    fn from(start: String) -> Self {
        Self(Value::from(start))
    }
}

/// One page of a paginated collection.
///
/// # Fields
///
/// | Field | JSON key | Description |
/// |-------|----------|-------------|
/// | `items` | `values` or `items` | Records on this page; `None` when absent or null |
/// | `is_last_page` | `isLastPage` | `Some(true)` when no further pages exist |
/// | `next_page_start` | `nextPageStart` | Cursor for the next request |
///
/// # Notes
///
/// - `items` keeps "absent" and "empty" apart; the fetcher treats both as
///   contributing no records
/// - A page without a boolean `isLastPage` is treated as the last page, see
///   [`has_next()`](Self::has_next)
/// - Each field is read on its own, so one mistyped field never discards
///   the others
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records on this page.
    pub items: Option<Vec<Record>>,

    /// Whether this is the final page.
    pub is_last_page: Option<bool>,

    /// Start value for the next request.
    pub next_page_start: Option<Cursor>,
}

impl Page {
    /// Interprets a decoded response body as a page.
    ///
    /// Bodies that are empty, plain text, or JSON without the page shape
    /// become an empty page with no item collection.
    pub fn from_payload(payload: Payload) -> Self {
        match payload {
            Payload::Json(record) => Self::from_record(&record),
            Payload::Empty | Payload::Text(_) => Self::default(),
        }
    }

    /// Reads the page fields of a JSON object.
    ///
    /// `values` takes precedence over `items`. A `null` cursor counts as absent.
    pub fn from_record(record: &Record) -> Self {
        let page = Self {
            items: record.records("values").or_else(|| record.records("items")),
            is_last_page: record.bool("isLastPage"),
            next_page_start: record
                .get("nextPageStart")
                .filter(|cursor| !cursor.is_null())
                .cloned()
                .map(Cursor),
        };
        if page.items.is_none() {
            debug!("Response carries no item collection");
        }
        page
    }

    /// Checks if the server reported more pages.
    ///
    /// Only an explicit `isLastPage: false` continues the walk; a missing
    /// flag ends it.
    pub fn has_next(&self) -> bool {
        self.is_last_page == Some(false)
    }
}

/// Query state carried across page requests.
///
/// `start` and `limit` are rewritten by the fetcher between pages; `extra`
/// holds endpoint-specific parameters that are sent unchanged on every
/// request.
///
/// # Example
///
/// ```rust
/// use atlassian_api::api::common::PageQuery;
///
/// let query = PageQuery::new().param("state", "OPEN").start(25u64).limit(10);
/// assert_eq!(
///     query.to_pairs(),
///     vec![
///         ("state".to_string(), "OPEN".to_string()),
///         ("start".to_string(), "25".to_string()),
///         ("limit".to_string(), "10".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    /// Offset or cursor of the first record to return.
    pub start: Option<Cursor>,
    /// Maximum number of records still wanted; `None` means unbounded.
    pub limit: Option<i64>,
    /// Endpoint-specific query parameters.
    pub extra: Vec<(String, String)>,
}

impl PageQuery {
    /// Creates an empty query: no start, no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the query the product wrappers use for `start`/`limit` arguments.
    ///
    /// A zero `start` is left out, as is an absent or zero `limit`; a zero
    /// limit means "no cap".
    pub fn window(start: u64, limit: Option<u64>) -> Self {
        let mut query = Self::new();
        if start > 0 {
            query.start = Some(Cursor::from(start));
        }
        if let Some(limit) = limit.filter(|limit| *limit > 0) {
            query.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        query
    }

    /// Sets the initial start cursor.
    pub fn start(mut self, start: impl Into<Cursor>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the cap on the total number of records.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds an endpoint-specific query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Flattens the query into `key=value` pairs, extra parameters first.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.extra.clone();
        if let Some(start) = &self.start {
            pairs.push(("start".to_string(), start.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Anything that can fetch one page of a collection endpoint.
///
/// [`AtlassianClient`](crate::api::AtlassianClient) implements this over
/// HTTP; tests substitute an in-memory source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches a single page of `path` with the given query.
    ///
    /// # Errors
    ///
    /// Transport failures are returned as-is and abort the walk.
    async fn fetch_page(&self, path: &str, query: &PageQuery) -> Result<Page, ApiError>;
}

/// Walks a paginated endpoint and concatenates its pages.
///
/// A `Paginator` borrows its [`PageSource`] and carries the tracing span its
/// events are recorded under. It holds no state between calls.
pub struct Paginator<'a, S: PageSource + ?Sized> {
    source: &'a S,
    span: Span,
}

impl<'a, S: PageSource + ?Sized> Paginator<'a, S> {
    /// Creates a paginator recording under the caller's current span.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            span: Span::current(),
        }
    }

    /// Records pagination events under the given span instead.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Fetches every record of `path`, following `nextPageStart` cursors.
    ///
    /// The walk issues one request with `query` as given and stops as soon as
    /// the first page has no item collection. Otherwise it keeps requesting
    /// while the server reports more pages. When `query.limit` is set, every
    /// follow-up request asks only for the records still missing, and the walk
    /// stops without another request once the records already collected
    /// exceed the limit. The records of that last page are kept, so the
    /// result can be longer than `limit` by up to one page.
    ///
    /// # Errors
    ///
    /// The first failing page request aborts the walk and its error is
    /// returned; records from earlier pages are dropped.
    pub async fn fetch_all(&self, path: &str, query: PageQuery) -> Result<Vec<Record>, ApiError> {
        self.walk(path, query).instrument(self.span.clone()).await
    }

    async fn walk(&self, path: &str, mut query: PageQuery) -> Result<Vec<Record>, ApiError> {
        let limit = query.limit;

        let mut page = self.source.fetch_page(path, &query).await?;
        let Some(mut accumulated) = page.items.take() else {
            debug!("{} returned no item collection", path);
            return Ok(Vec::new());
        };
        debug!(
            "{} page 1: {} items, last page: {:?}",
            path,
            accumulated.len(),
            page.is_last_page
        );

        let mut pages = 1usize;
        while page.has_next() {
            if let Some(limit) = limit {
                let collected = i64::try_from(accumulated.len()).unwrap_or(i64::MAX);
                let remaining = limit.saturating_sub(collected);
                if remaining < 0 {
                    debug!(
                        "{}: {} items collected, over the limit of {}",
                        path,
                        accumulated.len(),
                        limit
                    );
                    break;
                }
                query.limit = Some(remaining);
            }
            query.start = page.next_page_start.take();

            page = self.source.fetch_page(path, &query).await?;
            pages += 1;

            let items = page.items.take().unwrap_or_default();
            debug!(
                "{} page {}: {} items, last page: {:?}",
                path,
                pages,
                items.len(),
                page.is_last_page
            );
            accumulated.extend(items);
        }

        Ok(accumulated)
    }
}
