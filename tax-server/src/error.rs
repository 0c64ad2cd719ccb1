use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tax_core::{RepositoryError, calculations::TaxCalculationError};
use thiserror::Error;

use crate::api_types::ErrorResponse;
use crate::csv_loader::CsvLoadError;

/// Every failure a handler can report, mapped to a status code and a
/// `{"message"}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Calculation(#[from] TaxCalculationError),

    #[error("failed to update configuration: {0}")]
    Store(#[from] RepositoryError),

    #[error(transparent)]
    Csv(#[from] CsvLoadError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Calculation(TaxCalculationError::ConfigUnavailable(_)) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Calculation(_) | Self::Csv(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
