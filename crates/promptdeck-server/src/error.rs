//! Fatal handler errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use promptdeck_protocol::ErrorBody;

/// A fatal error that prevented any streaming; rendered as a single
/// non-streamed JSON body with HTTP 500.
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::fatal(format!("An error occurred: {}", self.0))),
        )
            .into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
