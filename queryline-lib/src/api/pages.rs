//! Async iterator for query pagination.

use crate::api::query::Page;
use crate::api::Query;
use crate::error::ApiError;
use crate::QuerylineClient;

/// Async iterator that yields pages of query results.
///
/// Pages are fetched strictly one at a time: each request's start offset
/// depends on how many records the earlier pages actually returned, so a
/// server that shrinks its page size mid-batch is tolerated without
/// skipping or re-reading records. A page shorter than the effective
/// limit (or empty) is the last one.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.pages(Query::new("album"));
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for record in page.records() {
///         println!("{record:?}");
///     }
/// }
/// ```
pub struct Pages<'a> {
    /// Reference to the client for making requests.
    client: &'a QuerylineClient,
    /// The query, mutated between fetches to advance the offset.
    query: Query,
    /// Effective per-page limit (explicit, or the client's default).
    limit: u64,
    /// Offset the first page was requested at.
    base: u64,
    /// Records fetched so far across all pages.
    fetched: u64,
    /// Whether we've seen the final page.
    done: bool,
}

impl<'a> Pages<'a> {
    /// Creates a new page iterator, filling in the query's limit and
    /// start only where the caller left them unset.
    pub(crate) fn new(client: &'a QuerylineClient, mut query: Query) -> Self {
        let limit = match query.limit_value() {
            Some(limit) => limit,
            None => {
                let limit = client.inner().page_size;
                query.set_limit(limit);
                limit
            }
        };
        let base = match query.start_value() {
            Some(start) => start,
            None => {
                query.set_start(0);
                0
            }
        };

        Self {
            client,
            query,
            limit,
            base,
            fetched: 0,
            done: false,
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` once the final page has been yielded. Any failure
    /// ends the iteration; already-yielded pages are the caller's to
    /// keep or discard.
    pub async fn next(&mut self) -> Option<Result<Page, ApiError>> {
        if self.done {
            return None;
        }

        let start = self.base + self.fetched;
        let records = match self.client.fetch_raw(&self.query).await {
            Ok(records) => records,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let page = Page::new(records, start, self.limit);
        self.fetched += page.len() as u64;

        if page.is_short() {
            self.done = true;
        } else {
            self.query.set_start(self.base + self.fetched);
        }

        Some(Ok(page))
    }
}
