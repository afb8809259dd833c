use axum::http::StatusCode;

use crate::error::WhispererError;

pub type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.into())
}

pub fn bad_gateway(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_GATEWAY, msg.into())
}

pub fn internal_error(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, msg.into())
}

/// Maps session failures onto HTTP statuses.
pub fn error_response(err: WhispererError) -> (StatusCode, String) {
    match err {
        WhispererError::InvalidInput(_) => bad_request(err.to_string()),
        WhispererError::RemoteCall(_) => bad_gateway(err.to_string()),
        _ => internal_error(err.to_string()),
    }
}
