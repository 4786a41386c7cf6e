//! Page error handling for the Palaver web front end.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::web::pages;

/// Error type for page handlers.
///
/// Maps domain errors onto HTTP status codes with a rendered HTML error page.
#[derive(Debug)]
pub enum PageError {
    /// The requested resource doesn't exist (404).
    NotFound(String),
    /// The request was malformed (400).
    BadRequest(String),
    /// Something went wrong on our side (500).
    Internal,
}

impl PageError {
    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            PageError::NotFound(message) => message.clone(),
            PageError::BadRequest(message) => message.clone(),
            PageError::Internal => "An internal error occurred".to_string(),
        };
        let body = pages::error_page(status, &message);
        (status, Html(body)).into_response()
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::NotFound(message) => write!(f, "not found: {message}"),
            PageError::BadRequest(message) => write!(f, "bad request: {message}"),
            PageError::Internal => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for PageError {}

impl From<crate::PalaverError> for PageError {
    fn from(err: crate::PalaverError) -> Self {
        match &err {
            crate::PalaverError::NotFound(what) => {
                PageError::not_found(format!("{what} not found"))
            }
            crate::PalaverError::Validation(message) => PageError::bad_request(message.clone()),
            _ => {
                tracing::error!("Internal error: {}", err);
                PageError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PalaverError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PageError::not_found("board not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PageError::bad_request("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PageError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_not_found() {
        let err: PageError = PalaverError::NotFound("board".to_string()).into();
        assert!(matches!(err, PageError::NotFound(_)));
    }

    #[test]
    fn test_from_validation() {
        let err: PageError = PalaverError::Validation("empty subject".to_string()).into();
        assert!(matches!(err, PageError::BadRequest(_)));
    }

    #[test]
    fn test_from_database_is_internal() {
        let err: PageError = PalaverError::Database("boom".to_string()).into();
        assert!(matches!(err, PageError::Internal));
    }
}
