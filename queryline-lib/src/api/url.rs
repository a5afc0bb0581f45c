//! Request URL generation.

use url::Url;

use crate::api::Query;
use crate::client::QuerylineClientInner;
use crate::error::ApiError;

/// Composes the request URL for one query.
///
/// Shape: `http(s)://<endpoint>/s:<service_id>/get/<namespace>/<encoded>`.
/// Service id and namespace come from the query when set, else from the
/// client defaults. The encoded query segment is not validated here; a
/// malformed segment passes through and only fails the final parse.
pub(crate) fn query_url(config: &QuerylineClientInner, query: &Query) -> Result<Url, ApiError> {
    let service_id = query.service_id_value().unwrap_or(&config.service_id);
    let namespace = query.namespace_value().unwrap_or(&config.namespace);
    let raw = compose(
        config.tls,
        &config.endpoint,
        service_id,
        namespace,
        &query.encode(),
    );
    Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
}

fn compose(tls: bool, endpoint: &str, service_id: &str, namespace: &str, encoded: &str) -> String {
    let scheme = if tls { "https" } else { "http" };
    format!(
        "{}://{}/s:{}/get/{}/{}",
        scheme,
        endpoint.trim_end_matches('/'),
        service_id,
        namespace,
        encoded
    )
}
