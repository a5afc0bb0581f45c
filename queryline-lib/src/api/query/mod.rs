//! Query descriptor and fluent builder.
//!
//! A [`Query`] describes one logical request against a named service:
//! which fields to return, which filter terms to apply, how to sort, and
//! optionally how many records to return starting at which offset.
//! [`Query::encode`] serializes the whole description into the single
//! path segment the wire protocol expects.

mod filter;
mod order;
mod page;

pub use filter::Filter;
pub use order::Direction;
pub use order::OrderBy;
pub use page::Page;

/// Describes a query against one remote data service.
///
/// Created per logical query, mutated across repeated fetches while a
/// batch runs, and discarded once the batch completes. `limit` and
/// `start` set explicitly by the caller are never overwritten; the batch
/// engine only fills them in when absent.
///
/// # Example
///
/// ```ignore
/// let query = Query::new("album")
///     .select(&["name", "year"])
///     .filter(Filter::eq("artist", "Fleet*"))
///     .order_by(OrderBy::desc("year"))
///     .limit(50);
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    service: String,
    service_id: Option<String>,
    namespace: Option<String>,
    fields: Vec<String>,
    filters: Vec<Filter>,
    order: Option<OrderBy>,
    limit: Option<u64>,
    start: Option<u64>,
}

impl Query {
    /// Creates a new query against the named service.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            service_id: None,
            namespace: None,
            fields: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
            start: None,
        }
    }

    /// Overrides the client's default service identifier for this query.
    pub fn service_id(mut self, id: impl Into<String>) -> Self {
        self.service_id = Some(id.into());
        self
    }

    /// Overrides the client's default namespace for this query.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Specifies which fields to return.
    ///
    /// If not called, the service decides.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Adds a filter term. Terms accumulate.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the ordering of results.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Limits the number of records per response.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the offset of the first record to return.
    pub fn start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Returns the service name this query targets.
    pub fn service_name(&self) -> &str {
        &self.service
    }

    /// Returns the service identifier override, if any.
    pub fn service_id_value(&self) -> Option<&str> {
        self.service_id.as_deref()
    }

    /// Returns the namespace override, if any.
    pub fn namespace_value(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the current limit, if set.
    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the current start offset, if set.
    pub fn start_value(&self) -> Option<u64> {
        self.start
    }

    /// Replaces the limit.
    pub fn set_limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }

    /// Replaces the start offset.
    pub fn set_start(&mut self, start: u64) {
        self.start = Some(start);
    }

    /// Serializes the query into the path segment the service expects.
    ///
    /// Pairs are joined with `;` in a fixed order (fields, filters, sort,
    /// limit, start); absent parts are omitted entirely. Values are
    /// percent-encoded; structural `=`, `,` and `;` stay literal.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();

        if !self.fields.is_empty() {
            let fields: Vec<_> = self
                .fields
                .iter()
                .map(|f| urlencoding::encode(f).into_owned())
                .collect();
            pairs.push(format!("fields={}", fields.join(",")));
        }

        for filter in &self.filters {
            pairs.push(filter.encode());
        }

        if let Some(order) = &self.order {
            pairs.push(format!("sort={}", order.encode()));
        }

        if let Some(limit) = self.limit {
            pairs.push(format!("limit={}", limit));
        }

        if let Some(start) = self.start {
            pairs.push(format!("start={}", start));
        }

        pairs.join(";")
    }
}
