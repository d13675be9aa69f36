use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chess_rules::RulesError;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorCode;

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub detail: String,
}

/// Process-level failures: startup, configuration, HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Io(_) => ErrorCode::IoError,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Config { detail } | AppError::Internal { detail } => detail.clone(),
            AppError::Io(err) => err.to_string(),
        }
    }
}

/// The only rules failure that reaches process level is a bad built-in
/// starting position.
impl From<RulesError> for AppError {
    fn from(err: RulesError) -> Self {
        AppError::config(format!("rules engine rejected start position: {err}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code().to_string(),
            detail: self.detail(),
        })
    }
}
