use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::docs::DocumentError;
use crate::index::IndexError;
use crate::render;

/// Request failure. The response carries only the status; the cause stays in
/// the server log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Document(DocumentError::InvalidSlug(_)) => StatusCode::BAD_REQUEST,
            AppError::Document(DocumentError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Document(DocumentError::Io { .. } | DocumentError::Frontmatter { .. })
            | AppError::Index(_)
            | AppError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        (status, Html(render::error_page(status.as_u16(), reason))).into_response()
    }
}
