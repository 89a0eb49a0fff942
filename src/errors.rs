use axum::http::StatusCode;
use tracing::error;

pub(crate) fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub(crate) fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, what.to_string())
}

pub(crate) fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.into())
}
