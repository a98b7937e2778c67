use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Offset {offset} is outside the forecast ({days} daily entries)")]
    OffsetOutOfRange { offset: usize, days: usize },

    #[error("No forecast loaded")]
    NoForecast,

    #[error("Forecast unavailable: {0}")]
    ForecastFailed(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::OffsetOutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoForecast => StatusCode::NOT_FOUND,
            AppError::ForecastFailed(_) => StatusCode::CONFLICT,
            AppError::Io(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
