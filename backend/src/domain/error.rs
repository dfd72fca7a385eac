//! Failure payload returned by catalog use-cases.
//!
//! Carries a coarse [`ErrorCode`] plus a display message; the HTTP adapter
//! picks the status code and redacts internal messages.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Failure category, serialised in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Pagination or identifier validation failed.
    InvalidRequest,
    /// The requested resource does not exist or the filter matched nothing.
    NotFound,
    /// A downstream dependency (database, pool) is unavailable.
    ServiceUnavailable,
    /// A catalog statement failed.
    InternalError,
}

/// Use-case failure.
///
/// The message is never blank.
///
/// # Examples
/// ```
/// use catalog_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no products found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "no products found")]
    message: String,
}

impl Error {
    /// Blank messages are replaced with a description of `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            default_message(code).to_owned()
        } else {
            message
        };
        Self { code, message }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// [`ErrorCode::InternalError`]; HTTP responses replace the message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn default_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "invalid request",
        ErrorCode::NotFound => "not found",
        ErrorCode::ServiceUnavailable => "service unavailable",
        ErrorCode::InternalError => "internal server error",
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "invalid request")]
    #[case(ErrorCode::NotFound, "not found")]
    #[case(ErrorCode::ServiceUnavailable, "service unavailable")]
    #[case(ErrorCode::InternalError, "internal server error")]
    fn blank_messages_fall_back_to_code_description(
        #[case] code: ErrorCode,
        #[case] expected: &str,
    ) {
        let err = Error::new(code, "   ");
        assert_eq!(err.message(), expected);
    }

    #[rstest]
    fn serialises_code_in_snake_case() {
        let err = Error::service_unavailable("pool exhausted");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(
            value,
            json!({ "code": "service_unavailable", "message": "pool exhausted" })
        );
    }

    #[rstest]
    fn display_uses_message() {
        let err = Error::invalid_request("page must be at least 1");
        assert_eq!(err.to_string(), "page must be at least 1");
    }
}
