//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by services, jobs and the HTTP surface.
//! Domain errors live in their own modules and convert through `#[from]`.

pub mod auth;
pub mod bungie;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serenity::http::HttpError;
use thiserror::Error;

use crate::error::{auth::AuthError, bungie::BungieError, config::ConfigError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// OAuth state or token exchange error.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Bungie platform error.
    #[error(transparent)]
    BungieErr(#[from] BungieError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to its size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Listener bind or other socket error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Invalid input, rejected before anything is persisted. The message is shown to the
    /// user as is.
    #[error("{0}")]
    BadRequest(String),

    /// The acting user lacks the required permission.
    #[error("{0}")]
    Forbidden(String),

    /// Internal error with a custom message.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep `AppError` small.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Whether Discord rejected the call because the target no longer exists or the bot
    /// may not touch it.
    ///
    /// Deleting a message or role that is already gone leaves the desired end state in
    /// place, so callers treat both as success.
    pub fn is_missing_or_forbidden(&self) -> bool {
        match self {
            Self::DiscordErr(err) => match err.as_ref() {
                serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => matches!(
                    response.status_code.as_u16(),
                    403 | 404
                ),
                _ => false,
            },
            Self::NotFound(_) => true,
            _ => false,
        }
    }

    /// Message suitable for an ephemeral reply.
    ///
    /// Validation and permission errors are shown verbatim. Anything else is logged by the
    /// caller and replaced with a generic sentence.
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Forbidden(msg) | Self::NotFound(msg) => msg.clone(),
            Self::BungieErr(err) => format!("Bungie request failed: {}", err),
            Self::AuthErr(err) => err.to_string(),
            _ => "Something went wrong, please try again later.".to_string(),
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 403 Forbidden - For `Forbidden`
/// - 404 Not Found - For `NotFound`
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
/// - 500 Internal Server Error - For everything else
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg).into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a logged 500 response with a generic
/// body.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
