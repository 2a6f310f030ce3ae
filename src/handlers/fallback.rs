use axum::http::{Method, Uri};

use super::extract::ClientKey;
use crate::error::ApiError;

// Anything the router doesn't know about
pub async fn not_found_handler(client: ClientKey, uri: Uri) -> ApiError {
    tracing::warn!(client = %client, "404 Not Found: {}", uri);
    ApiError::NotFound
}

// Known path, wrong verb
pub async fn method_not_allowed_handler(
    client: ClientKey,
    method: Method,
    uri: Uri,
) -> ApiError {
    tracing::warn!(client = %client, "405 Method Not Allowed: {} {}", method, uri);
    ApiError::MethodNotAllowed
}
