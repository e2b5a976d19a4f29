//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::Error;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::PlanetNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::PlanetAlreadyExists(_)
            | Error::Catalog(_)
            | Error::ObjectNotFound(_)
            | Error::Storage(_)
            | Error::Serialization(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &err {
            Error::PlanetAlreadyExists(_) => {
                tracing::info!(error = %err, "Duplicate planet rejected")
            }
            Error::Catalog(_) => tracing::warn!(error = %err, "Upstream catalog failure"),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %err, "Request failed")
            }
            _ => tracing::debug!(error = %err, "Request rejected"),
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}
