use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use fakesso_core::{
    identity::IdentityError,
    storage::{repository_error_to_status_code, RepositoryError},
    token::TokenError,
};

/// Body sent for every server-side failure.
pub const UNEXPECTED_ERROR: &str = "Unexpected error occurred";

/// Errors a flow step can answer with.
///
/// Client errors carry the message sent back to the caller. `Store` and
/// `Internal` are logged in full and answered with a generic body.
#[derive(Debug, Error)]
pub enum SsoError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Not found")]
    NotFound,

    #[error("identity store failure: {0}")]
    Store(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SsoError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(err) => StatusCode::from_u16(repository_error_to_status_code(err))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(_) | Self::Unauthorized(_) | Self::NotFound => self.to_string(),
            Self::Store(_) | Self::Internal(_) => UNEXPECTED_ERROR.to_string(),
        }
    }
}

impl From<TokenError> for SsoError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed(_) => Self::Unauthorized("Invalid token"),
            TokenError::Entropy(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<IdentityError> for SsoError {
    fn from(err: IdentityError) -> Self {
        Self::Store(err.into())
    }
}

impl IntoResponse for SsoError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )],
            self.public_message(),
        )
            .into_response()
    }
}
