use thiserror::Error;

/// Failures talking to the Bungie.net platform.
#[derive(Error, Debug)]
pub enum BungieError {
    /// The platform answered with an `ErrorStatus` other than `Success`.
    #[error("Bungie API error {status}: {message}")]
    Api {
        /// `ErrorStatus` field of the response
        status: String,
        /// `Message` field of the response
        message: String,
    },

    /// The configured clan admin has no linked profile to act with.
    #[error("Clan admin {0} has no linked Bungie profile")]
    AdminNotLinked(u64),

    /// The account has no Destiny memberships to link.
    #[error("Bungie account has no Destiny memberships")]
    NoDestinyMembership,

    /// The platform response was missing an expected field.
    #[error("Unexpected Bungie response: {0}")]
    UnexpectedResponse(String),
}
