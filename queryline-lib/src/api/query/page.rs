//! Page type for paginated query results.

use serde_json::Value;

/// One response's worth of untyped result records.
///
/// A page shorter than the limit it was fetched with is the protocol's
/// end-of-data signal; [`Page::is_short`] exposes that check.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.pages(Query::new("album"));
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     println!("{} records from offset {}", page.len(), page.start());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Page {
    records: Vec<Value>,
    /// Offset this page was fetched at.
    start: u64,
    /// Limit this page was fetched with.
    limit: u64,
}

impl Page {
    /// Creates a new page.
    pub(crate) fn new(records: Vec<Value>, start: u64, limit: u64) -> Self {
        Self {
            records,
            start,
            limit,
        }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Value> {
        self.records
    }

    /// Returns the offset this page was fetched at.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the limit this page was fetched with.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if this page signals end-of-data: fewer records
    /// than requested, or none at all.
    pub fn is_short(&self) -> bool {
        self.records.is_empty() || (self.records.len() as u64) < self.limit
    }
}
