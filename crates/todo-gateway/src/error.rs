use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use todo_core::{IdError, StorageError};
use tracing::{debug, error};

use crate::model::MessageResponse;
use crate::response::PrettyJson;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Every way a todo request can fail, mapped to a status in one place.
///
/// Store failures are split by the kind of operation that hit them: reads
/// (list, get) answer 404, writes answer 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidId(#[from] IdError),
    #[error("{0}")]
    InvalidBody(String),
    /// The body could not be read at all, e.g. it exceeds the size limit.
    #[error("{}", .0.body_text())]
    UnreadableBody(#[from] BytesRejection),
    #[error("todo not found")]
    NotFound,
    #[error("{0}")]
    ReadFailed(#[source] StorageError),
    #[error("{0}")]
    WriteFailed(#[source] StorageError),
    #[error("request timed out")]
    Timeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnreadableBody(rejection) => rejection.status(),
            ApiError::NotFound | ApiError::ReadFailed(_) => StatusCode::NOT_FOUND,
            ApiError::WriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::ReadFailed(source) | ApiError::WriteFailed(source) => {
                error!(error = %source, status = status.as_u16(), "storage operation failed");
            }
            other => debug!(error = %other, status = status.as_u16(), "rejected request"),
        }

        (status, PrettyJson(MessageResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_bad_request() {
        assert_eq!(
            ApiError::from(IdError::Missing).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidBody("EOF".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failures_depend_on_operation() {
        let err = StorageError::Unavailable("down".to_string());
        assert_eq!(
            ApiError::ReadFailed(err.clone()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::WriteFailed(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_is_404() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn timeout_is_408() {
        assert_eq!(ApiError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(ApiError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn id_error_message_is_preserved() {
        assert_eq!(
            ApiError::from(IdError::InvalidLength(3)).to_string(),
            "id is invalid"
        );
    }
}
