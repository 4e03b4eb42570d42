use crate::shared::errors::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error returned by the HTTP handlers as a status plus a short plain-text reason.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Todo not found",
        }
    }

    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Validation(_) => Self::bad_request("Todo text is required"),
            StoreError::NotFound { .. } => Self::not_found(),
            StoreError::ReadError(_) | StoreError::ParseError(_) => {
                tracing::error!(target: "http", error = %err, "Store read failed");
                Self::internal("Error reading data")
            }
            StoreError::WriteError(_) | StoreError::SerializeError(_) => {
                tracing::error!(target: "http", error = %err, "Store write failed");
                Self::internal("Error saving data")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(target: "http", error = %rejection, "Rejected request body");
        Self::bad_request("Invalid request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
