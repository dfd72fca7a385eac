//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into `{ code, message }` JSON responses with
//! matching status codes. Extractor failures are routed through the same
//! envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::debug;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

/// Reject malformed query strings with the domain error envelope.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected query string");
    Error::invalid_request(err.to_string()).into()
}

/// Reject path segments that do not parse, such as a non-numeric product id.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected path segment");
    Error::invalid_request(err.to_string()).into()
}

/// Reject malformed JSON bodies with the domain error envelope.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected request body");
    Error::invalid_request(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    //! Status and payload mapping for domain errors.
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), expected);
    }

    async fn body_of(error: &Error) -> Error {
        let response = ResponseError::error_response(error);
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        serde_json::from_slice(&bytes).expect("error payload")
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let payload = body_of(&Error::internal("catalog count query failed: syntax")).await;
        assert_eq!(payload, Error::internal("Internal server error"));
    }

    #[actix_web::test]
    async fn client_errors_keep_their_message() {
        let error = Error::not_found("no products found");
        assert_eq!(body_of(&error).await, error);
    }

    #[actix_web::test]
    async fn payload_uses_code_and_message_keys() {
        let response = ResponseError::error_response(&Error::invalid_request("page must be >= 1"));
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(
            value,
            serde_json::json!({"code": "invalid_request", "message": "page must be >= 1"})
        );
    }
}
