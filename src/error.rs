use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL provided")]
    InvalidUrl,

    #[error("Error accessing website: {0}")]
    FetchError(String),

    #[error("Error parsing AI response: {0}")]
    ParseError(String),

    #[error("Invalid Groq API key. Please check your API key configuration.")]
    AuthError,

    #[error("The specified model is not available.")]
    ModelUnavailable,

    #[error("Error in AI analysis: {0}")]
    AnalysisError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl | AppError::FetchError(_) => StatusCode::BAD_REQUEST,
            AppError::ParseError(_)
            | AppError::AuthError
            | AppError::ModelUnavailable
            | AppError::AnalysisError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let status = self.status_code();
        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
