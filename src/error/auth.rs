use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The OAuth state is unknown, already consumed or expired.
    ///
    /// Results in a 400 Bad Request response.
    #[error("OAuth state is invalid or has expired")]
    InvalidState,

    /// The redirect did not carry both `code` and `state`.
    #[error("OAuth redirect is missing the {0} parameter")]
    MissingParameter(&'static str),

    /// Exchanging the authorization code or refreshing a token failed.
    #[error("OAuth token request failed: {0}")]
    TokenRequest(String),

    /// Bungie integration is not configured on this deployment.
    #[error("Bungie integration is disabled")]
    Disabled,
}

/// Maps OAuth failures to user facing responses.
///
/// Details are logged at debug level and the body stays generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::InvalidState | Self::MissingParameter(_) => (
                StatusCode::BAD_REQUEST,
                "That link is invalid or has expired. Run /link-bungie again.",
            )
                .into_response(),
            Self::Disabled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Bungie account linking is not enabled.",
            )
                .into_response(),
            Self::TokenRequest(_) => (
                StatusCode::BAD_GATEWAY,
                "Bungie did not accept the login, please try again.",
            )
                .into_response(),
        }
    }
}
