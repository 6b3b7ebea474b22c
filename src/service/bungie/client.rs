//! reqwest and oauth2 implementation of the Bungie traits.

use std::{collections::HashSet, sync::Arc};

use chrono::Duration;
use oauth2::{
    basic::{BasicClient, BasicTokenResponse},
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, RefreshToken, TokenResponse, TokenUrl,
};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use serenity::async_trait;

use crate::{
    config::BungieConfig,
    data::bungie_profile::BungieProfileRepository,
    error::{auth::AuthError, bungie::BungieError, config::ConfigError, AppError},
    model::{bungie_profile::LinkedAccount, clan_invite::ClanApplicant},
    util::clock::Clock,
};

use super::{
    types::{GroupMember, PendingMember, PlatformResponse, SearchResult, UserMemberships},
    BungieAuth, ClanApi,
};

/// OAuth2 client with the authorize and token endpoints set.
type BungieOAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Bungie tokens last an hour when the response does not say otherwise.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

const APPROVE_MESSAGE: &str = "Welcome to the clan!";
const DENY_MESSAGE: &str = "Your request to join the clan was declined.";

pub struct BungieClient {
    config: BungieConfig,
    db: DatabaseConnection,
    http_client: reqwest::Client,
    oauth_client: BungieOAuthClient,
    /// Decides token expiry and the expiry of newly issued tokens.
    clock: Arc<dyn Clock>,
}

impl BungieClient {
    /// # Returns
    /// - `Ok(BungieClient)` - Client ready for use
    /// - `Err(AppError::ConfigErr)` - An OAuth endpoint is not a valid URL
    pub fn new(
        config: BungieConfig,
        db: DatabaseConnection,
        http_client: reqwest::Client,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let invalid = |name: &str, e: url::ParseError| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        };

        let mut oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(
                AuthUrl::new(config.auth_url.clone()).map_err(|e| invalid("BUNGIE_AUTH_URL", e))?,
            )
            .set_token_uri(
                TokenUrl::new(config.token_url.clone())
                    .map_err(|e| invalid("BUNGIE_TOKEN_URL", e))?,
            );

        if let Some(redirect) = &config.redirect_url {
            oauth_client = oauth_client.set_redirect_uri(
                RedirectUrl::new(redirect.clone())
                    .map_err(|e| invalid("BUNGIE_REDIRECT_URL", e))?,
            );
        }

        Ok(Self {
            config,
            db,
            http_client,
            oauth_client,
            clock,
        })
    }

    /// Access token of the clan admin, refreshed and persisted when expired.
    ///
    /// # Returns
    /// - `Ok(String)` - Usable access token
    /// - `Err(BungieError::AdminNotLinked)` - The admin has no linked profile
    /// - `Err(AuthError::TokenRequest)` - Refresh was rejected
    async fn admin_token(&self, admin_discord_id: u64) -> Result<String, AppError> {
        let repo = BungieProfileRepository::new(&self.db);
        let profile = repo
            .find_by_discord_id(admin_discord_id)
            .await?
            .ok_or(BungieError::AdminNotLinked(admin_discord_id))?;

        let now = self.clock.now();
        if !profile.is_token_expired(now) {
            return Ok(profile.access_token);
        }

        tracing::info!("Refreshing Bungie token of {}", admin_discord_id);

        let token = self
            .oauth_client
            .exchange_refresh_token(&RefreshToken::new(profile.refresh_token.clone()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::TokenRequest(e.to_string()))?;

        let access_token = token.access_token().secret().clone();
        let refresh_token = token
            .refresh_token()
            .map(|t| t.secret().clone())
            .unwrap_or(profile.refresh_token);

        repo.update_tokens(
            admin_discord_id,
            access_token.clone(),
            refresh_token,
            now + lifetime(&token),
        )
        .await?;

        Ok(access_token)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<PlatformResponse<T>, AppError> {
        let response = self
            .http_client
            .get(format!("{}/{}", self.config.api_root, path))
            .header("X-API-Key", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await?
            .json::<PlatformResponse<T>>()
            .await?;

        Ok(response)
    }

    async fn post(
        &self,
        path: &str,
        access_token: &str,
        body: serde_json::Value,
    ) -> Result<PlatformResponse<serde_json::Value>, AppError> {
        let response = self
            .http_client
            .post(format!("{}/{}", self.config.api_root, path))
            .header("X-API-Key", &self.config.api_key)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?
            .json::<PlatformResponse<serde_json::Value>>()
            .await?;

        Ok(response)
    }

    async fn resolve_application(
        &self,
        admin_discord_id: u64,
        action: &str,
        membership_type: i32,
        membership_id: &str,
        message: &str,
    ) -> Result<(), AppError> {
        let token = self.admin_token(admin_discord_id).await?;
        let path = format!(
            "GroupV2/{}/Members/{}/{}/{}/",
            self.config.clan_id, action, membership_type, membership_id
        );

        self.post(&path, &token, serde_json::json!({ "message": message }))
            .await?
            .check()
    }
}

fn lifetime(token: &BasicTokenResponse) -> Duration {
    token
        .expires_in()
        .and_then(|d| Duration::from_std(d).ok())
        .unwrap_or_else(|| Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS))
}

#[async_trait]
impl ClanApi for BungieClient {
    async fn clan_member_ids(&self, admin_discord_id: u64) -> Result<HashSet<String>, AppError> {
        let token = self.admin_token(admin_discord_id).await?;
        let members: SearchResult<GroupMember> = self
            .get(&format!("GroupV2/{}/Members/", self.config.clan_id), &token)
            .await?
            .into_result()?;

        Ok(members
            .results
            .into_iter()
            .filter_map(|m| m.destiny_user_info.membership_id)
            .collect())
    }

    async fn pending_applicants(
        &self,
        admin_discord_id: u64,
    ) -> Result<Vec<ClanApplicant>, AppError> {
        let token = self.admin_token(admin_discord_id).await?;
        let pending: SearchResult<PendingMember> = self
            .get(
                &format!("GroupV2/{}/Members/Pending/", self.config.clan_id),
                &token,
            )
            .await?
            .into_result()?;

        Ok(pending
            .results
            .into_iter()
            .filter_map(PendingMember::into_applicant)
            .collect())
    }

    async fn approve(
        &self,
        admin_discord_id: u64,
        membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError> {
        self.resolve_application(
            admin_discord_id,
            "Approve",
            membership_type,
            membership_id,
            APPROVE_MESSAGE,
        )
        .await
    }

    async fn deny(
        &self,
        admin_discord_id: u64,
        membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError> {
        self.resolve_application(
            admin_discord_id,
            "Deny",
            membership_type,
            membership_id,
            DENY_MESSAGE,
        )
        .await
    }

    async fn kick(
        &self,
        admin_discord_id: u64,
        membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError> {
        let token = self.admin_token(admin_discord_id).await?;
        let path = format!(
            "GroupV2/{}/Members/{}/{}/Kick/",
            self.config.clan_id, membership_type, membership_id
        );

        self.post(&path, &token, serde_json::json!({}))
            .await?
            .check()
    }
}

#[async_trait]
impl BungieAuth for BungieClient {
    fn authorize_url(&self, state: &str) -> String {
        let state = state.to_string();
        let (url, _) = self
            .oauth_client
            .authorize_url(move || CsrfToken::new(state))
            .url();

        url.to_string()
    }

    async fn link_account(&self, code: &str) -> Result<LinkedAccount, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::TokenRequest(e.to_string()))?;

        let access_token = token.access_token().secret().clone();
        let refresh_token = token
            .refresh_token()
            .map(|t| t.secret().clone())
            .ok_or_else(|| AuthError::TokenRequest("No refresh token issued".to_string()))?;

        let memberships: UserMemberships = self
            .get("User/GetMembershipsForCurrentUser/", &access_token)
            .await?
            .into_result()?;

        let destiny = memberships
            .destiny_memberships
            .into_iter()
            .next()
            .ok_or(BungieError::NoDestinyMembership)?;
        let membership_id = destiny.membership_id.ok_or_else(|| {
            BungieError::UnexpectedResponse("Destiny membership without id".to_string())
        })?;

        Ok(LinkedAccount {
            membership_id,
            membership_type: destiny.membership_type.unwrap_or_default(),
            bungie_name: memberships.bungie_net_user.unique_name,
            access_token,
            refresh_token,
            token_expires_at: self.clock.now() + lifetime(&token),
        })
    }
}
