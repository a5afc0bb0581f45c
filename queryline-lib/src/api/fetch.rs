//! Single-page and batch fetch operations.
//!
//! One round trip per page: build the URL, issue the GET, check the
//! status before touching the body, parse the body as JSON, and hand the
//! payload to the response interpreter. The batch entry points drive
//! [`Pages`](crate::api::Pages) over that single-page primitive and
//! convert to the caller's record type once, at the end.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::api::response::interpret;
use crate::api::url::query_url;
use crate::api::Query;
use crate::error::ApiError;
use crate::QuerylineClient;

impl QuerylineClient {
    /// Executes one request and returns its page of records, typed.
    ///
    /// Returns at most `limit` records (when the query sets one), in the
    /// order the service sent them.
    pub async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, ApiError> {
        let records = self.fetch_raw(query).await?;
        self.convert(records)
    }

    /// Fetches the complete result set for a query, page by page.
    ///
    /// A query without an explicit limit pages at the client's default
    /// page size; a query without an explicit start begins at offset 0.
    /// Any failure aborts the whole batch; no partial result is ever
    /// returned.
    pub async fn fetch_all<T: DeserializeOwned>(&self, query: Query) -> Result<Vec<T>, ApiError> {
        let mut pages = self.pages(query);
        let mut records = Vec::new();

        while let Some(page) = pages.next().await {
            records.extend(page?.into_records());
        }

        self.convert(records)
    }

    /// Like [`fetch_all`](Self::fetch_all), but observes a cancellation
    /// token at every round trip.
    ///
    /// Cancellation aborts the remaining fetches and fails with
    /// [`ApiError::Cancelled`] instead of returning a partial batch.
    pub async fn fetch_all_with_cancel<T: DeserializeOwned>(
        &self,
        query: Query,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, ApiError> {
        let mut pages = self.pages(query);
        let mut records = Vec::new();

        loop {
            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(self.note_failure(ApiError::Cancelled));
                }
                page = pages.next() => match page {
                    Some(page) => page?,
                    None => break,
                },
            };
            records.extend(page.into_records());
        }

        self.convert(records)
    }

    /// Executes one request and returns its page of records, untyped.
    pub(crate) async fn fetch_raw(&self, query: &Query) -> Result<Vec<Value>, ApiError> {
        match self.fetch_raw_inner(query).await {
            Ok(records) => Ok(records),
            Err(e) => Err(self.note_failure(e)),
        }
    }

    async fn fetch_raw_inner(&self, query: &Query) -> Result<Vec<Value>, ApiError> {
        let url = query_url(self.inner(), query)?;

        let mut request = self.inner().http_client.get(url.as_str());
        if let Some(timeout) = self.inner().timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::connection(url.as_str(), e.to_string()))?;

        // Status before body: a non-2xx reply is a connection failure no
        // matter what the body contains.
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::connection_status(
                url.as_str(),
                status.as_u16(),
                body,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::connection(url.as_str(), e.to_string()))?;

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| ApiError::protocol(e.to_string(), body))?;

        interpret(payload, query.service_name())
    }

    fn convert<T: DeserializeOwned>(&self, records: Vec<Value>) -> Result<Vec<T>, ApiError> {
        records
            .into_iter()
            .map(|record| {
                serde_json::from_value(record)
                    .map_err(|e| self.note_failure(ApiError::Decode(e.to_string())))
            })
            .collect()
    }

    /// Optionally logs a failure before it propagates. Never changes the
    /// error or the control flow.
    fn note_failure(&self, error: ApiError) -> ApiError {
        if self.inner().log_failures {
            warn!("queryline request failed: {error}");
        }
        error
    }
}
