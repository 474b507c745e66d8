use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use papertrade_core::errors::Error as CoreError;

/// Errors surfaced at the HTTP boundary.
///
/// The observable contract is narrow: business and upstream failures map
/// to 400 with the bare message, authentication failures to 401. Nothing
/// here ever takes the process down.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            // Validation, conflicts, trade rejections, upstream failures
            // and storage errors all answer 400 with the message as-is.
            ApiError::Core(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Auth(e) => return e.status_response(),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        let body = Json(ErrorBody { error: msg });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
