//! Filter terms for queries.

/// One filter term of a query.
///
/// Terms are independent `field=value` constraints; the service combines
/// them conjunctively. Values may carry server-side wildcards (`*`).
///
/// # Example
///
/// ```
/// use queryline_lib::Filter;
///
/// let exact = Filter::eq("artist", "Low");
/// let prefix = Filter::eq("artist", "Fleet*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Constrains a field to a value (possibly a wildcard pattern).
    Eq(String, String),
    /// A pre-encoded term passed through unchanged.
    ///
    /// The wire format is not validated; a malformed term reaches the
    /// service as-is.
    Raw(String),
}

impl Filter {
    /// Creates an equality term.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    /// Creates a raw, pre-encoded term.
    pub fn raw(term: impl Into<String>) -> Self {
        Self::Raw(term.into())
    }

    /// Encodes the term as one `key=value` pair of the query segment.
    pub(crate) fn encode(&self) -> String {
        match self {
            Self::Eq(field, value) => format!(
                "{}={}",
                urlencoding::encode(field),
                urlencoding::encode(value)
            ),
            Self::Raw(term) => term.clone(),
        }
    }
}
