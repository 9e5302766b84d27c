use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "internal server error";

/// Errors a request handler can end with. None of them outlive the request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("{action} failed: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Tags a store failure with the fixed action prefix used in the log line.
    pub fn store(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Store { action, source }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Decode(e) => e.to_string(),
            AppError::Store { .. } => {
                log::error!("{}", self);
                INTERNAL_SERVER_ERROR_MESSAGE.to_string()
            }
        };
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(body)
    }
}

/// Anything that stops the service before or while it binds.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("setup database failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("server failed: {0}")]
    Io(#[from] std::io::Error),
}
