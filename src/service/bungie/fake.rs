//! Recording Bungie client for tests.

use std::{collections::HashSet, sync::Mutex};

use chrono::{TimeZone, Utc};
use serenity::async_trait;

use crate::{
    error::{bungie::BungieError, AppError},
    model::{bungie_profile::LinkedAccount, clan_invite::ClanApplicant},
};

use super::{BungieAuth, ClanApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClanCall {
    Approve { membership_id: String },
    Deny { membership_id: String },
    Kick { membership_id: String },
}

#[derive(Default)]
struct FakeClanState {
    members: HashSet<String>,
    applicants: Vec<ClanApplicant>,
    failing: HashSet<String>,
    calls: Vec<ClanCall>,
}

/// In-memory clan. Codes starting with `good` link to membership `4611686018400000999`.
#[derive(Default)]
pub struct FakeClan {
    state: Mutex<FakeClanState>,
}

impl FakeClan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(self, membership_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .members
            .insert(membership_id.to_string());
        self
    }

    pub fn with_applicant(self, membership_id: &str, bungie_name: &str) -> Self {
        self.state.lock().unwrap().applicants.push(ClanApplicant {
            membership_id: membership_id.to_string(),
            membership_type: 3,
            bungie_name: bungie_name.to_string(),
            applied_at: None,
        });
        self
    }

    /// Approve, deny and kick fail for this membership.
    pub fn with_failing(self, membership_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(membership_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ClanCall> {
        self.state.lock().unwrap().calls.clone()
    }

    fn act(&self, call: ClanCall, membership_id: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.failing.contains(membership_id) {
            return Err(BungieError::Api {
                status: "ClanMemberNotFound".to_string(),
                message: "Not a member".to_string(),
            }
            .into());
        }
        state.calls.push(call);
        Ok(())
    }
}

#[async_trait]
impl ClanApi for FakeClan {
    async fn clan_member_ids(&self, _admin_discord_id: u64) -> Result<HashSet<String>, AppError> {
        Ok(self.state.lock().unwrap().members.clone())
    }

    async fn pending_applicants(
        &self,
        _admin_discord_id: u64,
    ) -> Result<Vec<ClanApplicant>, AppError> {
        Ok(self.state.lock().unwrap().applicants.clone())
    }

    async fn approve(
        &self,
        _admin_discord_id: u64,
        _membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError> {
        self.act(
            ClanCall::Approve {
                membership_id: membership_id.to_string(),
            },
            membership_id,
        )
    }

    async fn deny(
        &self,
        _admin_discord_id: u64,
        _membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError> {
        self.act(
            ClanCall::Deny {
                membership_id: membership_id.to_string(),
            },
            membership_id,
        )
    }

    async fn kick(
        &self,
        _admin_discord_id: u64,
        _membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError> {
        self.act(
            ClanCall::Kick {
                membership_id: membership_id.to_string(),
            },
            membership_id,
        )
    }
}

#[async_trait]
impl BungieAuth for FakeClan {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://bungie.test/authorize?state={}", state)
    }

    async fn link_account(&self, code: &str) -> Result<LinkedAccount, AppError> {
        if !code.starts_with("good") {
            return Err(
                crate::error::auth::AuthError::TokenRequest("invalid_grant".to_string()).into(),
            );
        }

        Ok(LinkedAccount {
            membership_id: "4611686018400000999".to_string(),
            membership_type: 3,
            bungie_name: "Guardian#0001".to_string(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        })
    }
}
