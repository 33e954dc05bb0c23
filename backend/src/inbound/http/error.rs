//! HTTP mapping for domain and store errors.
//!
//! The domain [`Error`] stays transport-agnostic; this module picks status
//! codes, sets the `Trace-Id` header and redacts internal failures.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::ports::StoreError;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let redacted = Error::internal("Internal server error");
        match error.trace_id() {
            Some(id) => redacted.with_trace_id(id),
            None => redacted,
        }
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

/// Translate a store failure into the API error returned to clients.
///
/// `resource` names the thing that was looked up, e.g. `"user"`.
pub fn map_store_error(err: StoreError, resource: &str) -> Error {
    match err {
        StoreError::NotFound => Error::not_found(format!("{resource} not found")),
        StoreError::DuplicateEmail => Error::conflict("email is already registered")
            .with_details(serde_json::json!({ "field": "email" })),
        StoreError::DuplicateUsername => Error::conflict("username is already taken")
            .with_details(serde_json::json!({ "field": "username" })),
        StoreError::Connection { .. } | StoreError::Timeout { .. } => {
            warn!(error = %err, "store unavailable");
            Error::service_unavailable("storage is temporarily unavailable")
        }
        StoreError::Query { .. } => {
            error!(error = %err, "store query failed");
            Error::internal(err.to_string())
        }
    }
}
