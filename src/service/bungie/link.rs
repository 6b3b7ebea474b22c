//! Linking a Discord user to their Bungie account.
//!
//! `/link-bungie` stores a random OAuth state for the user and DMs them the authorize
//! URL. The redirect comes back either to the HTTP callback or pasted into the DM; both
//! consume the state once and store the tokens.

use chrono::{DateTime, Duration, Utc};
use oauth2::CsrfToken;
use sea_orm::DatabaseConnection;
use url::Url;

use crate::{
    data::{bungie_profile::BungieProfileRepository, oauth_state::OauthStateRepository},
    error::{auth::AuthError, AppError},
    model::bungie_profile::BungieProfile,
};

use super::BungieAuth;

const STATE_TTL_MINUTES: i64 = 10;

/// `code` and `state` of an OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRedirect {
    pub code: String,
    pub state: String,
}

impl OAuthRedirect {
    /// Extracts the redirect parameters from text that contains the redirect URL.
    ///
    /// # Returns
    /// - `Ok(OAuthRedirect)` - Both parameters found
    /// - `Err(AuthError::MissingParameter)` - No URL, or one parameter is absent
    pub fn from_pasted(text: &str) -> Result<Self, AuthError> {
        let url = text
            .split_whitespace()
            .find(|token| token.contains("code="))
            .and_then(|token| Url::parse(token).ok())
            .ok_or(AuthError::MissingParameter("code"))?;

        let mut code = None;
        let mut state = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            code: code
                .filter(|c| !c.is_empty())
                .ok_or(AuthError::MissingParameter("code"))?,
            state: state
                .filter(|s| !s.is_empty())
                .ok_or(AuthError::MissingParameter("state"))?,
        })
    }
}

pub struct AccountLinkService<'a> {
    db: &'a DatabaseConnection,
    auth: &'a dyn BungieAuth,
}

impl<'a> AccountLinkService<'a> {
    pub fn new(db: &'a DatabaseConnection, auth: &'a dyn BungieAuth) -> Self {
        Self { db, auth }
    }

    /// Persists a fresh state for the user and returns the authorize URL to send them.
    pub async fn start(&self, discord_id: u64, now: DateTime<Utc>) -> Result<String, AppError> {
        let state = CsrfToken::new_random().secret().clone();

        OauthStateRepository::new(self.db)
            .create(
                state.clone(),
                discord_id,
                now + Duration::minutes(STATE_TTL_MINUTES),
            )
            .await?;

        Ok(self.auth.authorize_url(&state))
    }

    /// Consumes the state and links the account of the user who started the flow.
    ///
    /// When `expected_user` is given, as for a URL pasted in DMs, the state must belong to
    /// that user.
    ///
    /// # Returns
    /// - `Ok(BungieProfile)` - Stored link
    /// - `Err(AuthError::InvalidState)` - Unknown, used, expired, or foreign state
    pub async fn complete(
        &self,
        redirect: &OAuthRedirect,
        expected_user: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<BungieProfile, AppError> {
        let state = OauthStateRepository::new(self.db)
            .consume(&redirect.state, now)
            .await?
            .ok_or(AuthError::InvalidState)?;

        if expected_user.is_some_and(|user| user != state.discord_id) {
            return Err(AuthError::InvalidState.into());
        }

        let account = self.auth.link_account(&redirect.code).await?;
        let profile = BungieProfileRepository::new(self.db)
            .upsert(state.discord_id, account)
            .await?;

        tracing::info!(
            "Linked Discord user {} to Bungie account {}",
            profile.discord_id,
            profile.bungie_name
        );

        Ok(profile)
    }
}
