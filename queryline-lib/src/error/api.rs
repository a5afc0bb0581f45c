//! API error types

/// Errors that can occur while executing a query.
///
/// The variants mirror the distinct failure conditions of the remote
/// service protocol, so callers can match on the kind (for example, to
/// apply backoff on [`ApiError::ServiceUnavailable`] but not on a
/// generic [`ApiError::Server`] report).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure or a non-success HTTP status code.
    #[error("connection failed for {url}: {message}")]
    Connection {
        /// The request URL that failed.
        url: String,
        /// Message from the underlying cause, or the response body for
        /// a non-success status.
        message: String,
        /// HTTP status code, if a response was received at all.
        status: Option<u16>,
    },

    /// The response body was not valid JSON.
    ///
    /// Usually a hint that the endpoint is degraded or in maintenance
    /// and answering with an HTML placeholder page.
    #[error("response was not valid JSON: {message}")]
    Protocol {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The service reported itself as unavailable.
    #[error("service unavailable")]
    ServiceUnavailable,

    /// Any other server-reported error condition.
    #[error("server error: {0}")]
    Server(String),

    /// A well-formed success response without the expected result array.
    ///
    /// This is a caller/service contract mismatch, not a transient
    /// condition; retrying the same query will not help.
    #[error("response has no `{field}` array for service `{service}`")]
    MissingResultList {
        /// The service the query targeted.
        service: String,
        /// The array field that was expected, `<service>_list`.
        field: String,
    },

    /// A result record did not deserialize into the requested type.
    #[error("failed to decode record: {0}")]
    Decode(String),

    /// The request URL could not be constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The batch was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Creates a new connection error from a transport-level cause.
    pub fn connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            url: url.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Creates a new connection error for a non-success HTTP status.
    pub fn connection_status(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Connection {
            url: url.into(),
            message: body.into(),
            status: Some(status),
        }
    }

    /// Creates a new protocol error with the raw response body.
    pub fn protocol(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is a status-carrying connection error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Connection { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially retryable by the caller.
    ///
    /// The client itself never retries; this only classifies kinds for
    /// callers implementing their own backoff policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { status, .. } => {
                matches!(status, None | Some(429) | Some(500) | Some(502) | Some(503) | Some(504))
            }
            Self::ServiceUnavailable => true,
            _ => false,
        }
    }
}
