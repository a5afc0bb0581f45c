//! Main QuerylineClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::api::Pages;
use crate::api::Query;

/// Page size applied to a batch when the query does not set its own limit.
pub const DEFAULT_PAGE_SIZE: u64 = 500;

/// Namespace used when neither the query nor the builder names one.
pub const DEFAULT_NAMESPACE: &str = "main";

/// The main client for a queryline-style data service.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Independent queries may run concurrently; they
/// share nothing but the underlying HTTP connection pool.
///
/// # Example
///
/// ```ignore
/// use queryline_lib::{QuerylineClient, Query};
///
/// let client = QuerylineClient::builder()
///     .endpoint("data.example.org")
///     .service_id("demo")
///     .build();
///
/// let albums: Vec<Album> = client.fetch_all(Query::new("album")).await?;
/// ```
#[derive(Clone)]
pub struct QuerylineClient {
    inner: Arc<QuerylineClientInner>,
}

pub(crate) struct QuerylineClientInner {
    pub(crate) endpoint: String,
    pub(crate) tls: bool,
    pub(crate) service_id: String,
    pub(crate) namespace: String,
    pub(crate) page_size: u64,
    pub(crate) log_failures: bool,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl QuerylineClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> QuerylineClientBuilder<Missing, Missing> {
        QuerylineClientBuilder::new()
    }

    /// Returns the endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Returns the default service identifier.
    pub fn service_id(&self) -> &str {
        &self.inner.service_id
    }

    /// Returns the default namespace.
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// Converts a query into an async iterator over its result pages.
    ///
    /// [`fetch_all`](Self::fetch_all) drains the same iterator; use `pages`
    /// directly to observe one round trip at a time.
    pub fn pages(&self, query: Query) -> Pages<'_> {
        Pages::new(self, query)
    }

    pub(crate) fn inner(&self) -> &QuerylineClientInner {
        &self.inner
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`QuerylineClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `endpoint` - Host (and optional port) of the service, without a scheme
/// - `service_id` - The static service identifier placed in every request URL
///
/// # Example
///
/// ```ignore
/// let client = QuerylineClient::builder()
///     .endpoint("data.example.org")
///     .service_id("demo")
///     .namespace("archive")
///     .user_agent("my-app/1.0")
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct QuerylineClientBuilder<Endpoint, ServiceId> {
    endpoint: Endpoint,
    service_id: ServiceId,
    tls: bool,
    namespace: String,
    page_size: u64,
    log_failures: bool,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl QuerylineClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: Missing,
            service_id: Missing,
            tls: true,
            namespace: DEFAULT_NAMESPACE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_failures: false,
            user_agent: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for QuerylineClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> QuerylineClientBuilder<Missing, S> {
    /// Sets the service endpoint, host and optional port without a scheme.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .endpoint("data.example.org")
    /// ```
    pub fn endpoint(self, endpoint: impl Into<String>) -> QuerylineClientBuilder<Set<String>, S> {
        QuerylineClientBuilder {
            endpoint: Set(endpoint.into()),
            service_id: self.service_id,
            tls: self.tls,
            namespace: self.namespace,
            page_size: self.page_size,
            log_failures: self.log_failures,
            user_agent: self.user_agent,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<E> QuerylineClientBuilder<E, Missing> {
    /// Sets the static service identifier.
    pub fn service_id(self, id: impl Into<String>) -> QuerylineClientBuilder<E, Set<String>> {
        QuerylineClientBuilder {
            endpoint: self.endpoint,
            service_id: Set(id.into()),
            tls: self.tls,
            namespace: self.namespace,
            page_size: self.page_size,
            log_failures: self.log_failures,
            user_agent: self.user_agent,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<E, S> QuerylineClientBuilder<E, S> {
    /// Enables or disables TLS for request URLs.
    ///
    /// Defaults to `true` (`https`).
    pub fn use_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Sets the default namespace for queries that do not name one.
    ///
    /// Defaults to `main`.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the page size used by batch fetches when the query has no
    /// explicit limit.
    ///
    /// Defaults to [`DEFAULT_PAGE_SIZE`].
    pub fn page_size(mut self, size: u64) -> Self {
        self.page_size = size;
        self
    }

    /// Enables diagnostic logging of failed requests via the `log` facade.
    ///
    /// Logging never changes control flow or error content.
    pub fn log_failures(mut self, enabled: bool) -> Self {
        self.log_failures = enabled;
        self
    }

    /// Sets the `User-Agent` header applied to every request.
    ///
    /// This is applied when building the HTTP client.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Sets the per-request timeout.
    ///
    /// Without one, a hung request blocks its whole batch on the
    /// transport's own defaults.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl QuerylineClientBuilder<Set<String>, Set<String>> {
    /// Builds the [`QuerylineClient`].
    ///
    /// This method is only available when both `endpoint` and `service_id`
    /// have been set.
    pub fn build(self) -> QuerylineClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            if let Some(agent) = &self.user_agent {
                builder = builder.user_agent(agent.clone());
            }
            builder.build().expect("Failed to build HTTP client")
        });

        QuerylineClient {
            inner: Arc::new(QuerylineClientInner {
                endpoint: self.endpoint.0,
                tls: self.tls,
                service_id: self.service_id.0,
                namespace: self.namespace,
                page_size: self.page_size,
                log_failures: self.log_failures,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
