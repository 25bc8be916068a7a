use serde::{Deserialize, Serialize};

use super::common::{BanMode, Patch};
use super::ip::IpInfo;
use crate::http::QueryParams;

/// A registered player.
///
/// Timestamps are kept as the strings the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qqguild: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    pub in_qq_group: bool,
    pub in_qq_guild: bool,
    pub in_discord: bool,
    pub ban_mode: BanMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_expire: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qqguild: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default)]
    pub in_qq_group: bool,
    #[serde(default)]
    pub in_qq_guild: bool,
    #[serde(default)]
    pub in_discord: bool,
}

impl CreatePlayerRequest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Partial update. Only fields that are not `None`/`Unchanged` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePlayerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub town_id: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub qq: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub qqguild: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub discord: Patch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_qq_group: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_qq_guild: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_discord: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanPlayerRequest {
    pub ban_mode: BanMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
    pub reason: String,
}

impl BanPlayerRequest {
    pub fn temporary(duration_seconds: i64, reason: &str) -> Self {
        Self {
            ban_mode: BanMode::Temporary,
            duration_seconds: Some(duration_seconds),
            reason: reason.to_string(),
        }
    }

    pub fn permanent(reason: &str) -> Self {
        Self {
            ban_mode: BanMode::Permanent,
            duration_seconds: None,
            reason: reason.to_string(),
        }
    }
}

/// One player in a batch validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerValidateInfo {
    pub player_name: String,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub players: Vec<PlayerValidateInfo>,
    pub server_id: i32,
    pub login: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerValidateResult {
    pub player_name: String,
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub newbie: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_info: Option<IpInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub results: Vec<PlayerValidateResult>,
    pub processed_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateLoginRequest {
    pub name: String,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateLoginData {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_info: Option<IpInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayersListData {
    pub players: Vec<Player>,
    pub total: i32,
    pub page: i32,
    #[serde(alias = "page_size")]
    pub size: i32,
}

/// Filters for `GET /api/v1/players`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPlayersParams {
    pub page: Option<i32>,
    pub page_size: Option<i32>,
    pub search: Option<String>,
    pub town_id: Option<i32>,
    pub ban_mode: Option<BanMode>,
    pub name: Option<String>,
    pub qq: Option<String>,
    pub qqguild: Option<String>,
    pub discord: Option<String>,
}

impl ListPlayersParams {
    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
            .push_opt("search", self.search.as_deref())
            .push_opt("town_id", self.town_id)
            .push_opt("ban_mode", self.ban_mode)
            .push_opt("name", self.name.as_deref())
            .push_opt("qq", self.qq.as_deref())
            .push_opt("qqguild", self.qqguild.as_deref())
            .push_opt("discord", self.discord.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn create_request_omits_absent_fields() {
        let req = CreatePlayerRequest {
            discord: Some("steve#0001".to_string()),
            ..CreatePlayerRequest::new("Steve")
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "Steve",
                "discord": "steve#0001",
                "in_qq_group": false,
                "in_qq_guild": false,
                "in_discord": false,
            })
        );
    }

    #[test]
    fn empty_update_is_empty_object() {
        let req = UpdatePlayerRequest::default();
        assert_eq!(serde_json::to_string(&req).unwrap(), "{}");
    }

    #[test]
    fn update_can_leave_town() {
        let req = UpdatePlayerRequest {
            town_id: Patch::Clear,
            in_discord: Some(true),
            ..UpdatePlayerRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"town_id": null, "in_discord": true})
        );
    }

    #[test]
    fn temporary_ban_carries_duration() {
        let req = BanPlayerRequest::temporary(3600, "griefing");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"ban_mode": 1, "duration_seconds": 3600, "reason": "griefing"})
        );
        let req = BanPlayerRequest::permanent("cheating");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"ban_mode": 2, "reason": "cheating"})
        );
    }

    #[test]
    fn player_decodes_with_missing_optional_columns() {
        let player: Player = serde_json::from_value(json!({
            "id": 1,
            "name": "Alex",
            "in_qq_group": true,
            "in_qq_guild": false,
            "in_discord": false,
            "ban_mode": 0,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
        }))
        .unwrap();
        assert_eq!(player.town_id, None);
        assert_eq!(player.ban_mode, BanMode::Normal);
        assert!(player.in_qq_group);
    }

    #[test]
    fn list_params_render_enum_as_integer() {
        let params = ListPlayersParams {
            page: Some(1),
            ban_mode: Some(BanMode::Permanent),
            search: Some("ste".to_string()),
            ..ListPlayersParams::default()
        };
        assert_eq!(
            params.query().to_query_string(),
            "page=1&search=ste&ban_mode=2"
        );
    }

    #[test]
    fn list_data_accepts_page_size_alias() {
        let data: PlayersListData = serde_json::from_value(json!({
            "players": [],
            "total": 0,
            "page": 1,
            "page_size": 20,
        }))
        .unwrap();
        assert_eq!(data.size, 20);
    }
}
