//! Bungie platform response shapes, limited to the fields the bot reads.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::{bungie::BungieError, AppError},
    model::clan_invite::ClanApplicant,
};

/// Envelope around every platform response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlatformResponse<T> {
    pub response: Option<T>,
    pub error_status: String,
    #[serde(default)]
    pub message: String,
}

impl<T> PlatformResponse<T> {
    /// Unwraps the payload of a successful response.
    ///
    /// # Returns
    /// - `Ok(T)` - `ErrorStatus` was `Success` and a payload was present
    /// - `Err(BungieError::Api)` - Any other `ErrorStatus`
    /// - `Err(BungieError::UnexpectedResponse)` - Success without payload
    pub fn into_result(self) -> Result<T, AppError> {
        if self.error_status != "Success" {
            return Err(BungieError::Api {
                status: self.error_status,
                message: self.message,
            }
            .into());
        }

        self.response.ok_or_else(|| {
            BungieError::UnexpectedResponse("Success without Response".to_string()).into()
        })
    }

    /// Checks the status of a response whose payload is not needed.
    pub fn check(self) -> Result<(), AppError> {
        if self.error_status != "Success" {
            return Err(BungieError::Api {
                status: self.error_status,
                message: self.message,
            }
            .into());
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResult<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyUserInfo {
    pub membership_id: Option<String>,
    pub membership_type: Option<i32>,
    pub bungie_global_display_name: Option<String>,
    pub bungie_global_display_name_code: Option<i32>,
}

impl DestinyUserInfo {
    /// `Name#0123`, with placeholders for missing parts.
    pub fn bungie_name(&self) -> String {
        format!(
            "{}#{:04}",
            self.bungie_global_display_name.as_deref().unwrap_or("N/A"),
            self.bungie_global_display_name_code.unwrap_or(0)
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub destiny_user_info: DestinyUserInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMember {
    pub destiny_user_info: DestinyUserInfo,
    pub date_applied: Option<DateTime<Utc>>,
}

impl PendingMember {
    /// Applicant in domain form. Entries without a membership id are dropped.
    pub fn into_applicant(self) -> Option<ClanApplicant> {
        let info = self.destiny_user_info;
        let bungie_name = info.bungie_name();

        Some(ClanApplicant {
            membership_id: info.membership_id?,
            membership_type: info.membership_type.unwrap_or_default(),
            bungie_name,
            applied_at: self.date_applied,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMemberships {
    pub bungie_net_user: BungieNetUser,
    #[serde(default = "Vec::new")]
    pub destiny_memberships: Vec<DestinyUserInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BungieNetUser {
    pub unique_name: String,
}
