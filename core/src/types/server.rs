use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Patch, ServerType};
use super::player::Player;
use crate::http::QueryParams;

/// A registered game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRegistry {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub port: i32,
    #[serde(rename = "type")]
    pub server_type: ServerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Live state reported through heartbeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub id: i32,
    pub server_id: i32,
    pub is_online: bool,
    pub current_players: i32,
    pub max_players: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tps: Option<f64>,
    pub last_heartbeat: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateServerRequest {
    pub name: String,
    pub address: String,
    pub port: i32,
    #[serde(rename = "type")]
    pub server_type: ServerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateServerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub server_type: Option<ServerType>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServersListData {
    pub servers: Vec<ServerRegistry>,
    pub total: i32,
    pub page: i32,
    #[serde(alias = "page_size")]
    pub size: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDetailData {
    pub server: ServerRegistry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServerStatus>,
}

/// Servers a player is associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerServersData {
    pub servers: Vec<ServerRegistry>,
    pub total: i32,
    pub page: i32,
    #[serde(alias = "page_size")]
    pub size: i32,
}

/// Players on one server, or online across all servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPlayersData {
    pub players: Vec<Player>,
    pub total: i32,
    pub page: i32,
    #[serde(alias = "page_size")]
    pub size: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPlayersOfflineRequest {
    pub server_id: i32,
    pub player_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListServersParams {
    pub page: Option<i32>,
    pub page_size: Option<i32>,
    pub search: Option<String>,
    pub online_only: Option<bool>,
}

impl ListServersParams {
    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
            .push_opt("search", self.search.as_deref())
            .push_opt("online_only", self.online_only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnlinePlayersParams {
    pub page: Option<i32>,
    pub page_size: Option<i32>,
    pub search: Option<String>,
    pub server_id: Option<i32>,
}

impl OnlinePlayersParams {
    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
            .push_opt("search", self.search.as_deref())
            .push_opt("server_id", self.server_id)
    }
}

/// Filters for the global server-player listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerPlayersParams {
    pub page: Option<i32>,
    pub page_size: Option<i32>,
    pub search: Option<String>,
    pub server_id: Option<i32>,
    /// `Some(false)` is sent explicitly and includes offline players.
    pub online_only: Option<bool>,
}

impl ServerPlayersParams {
    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
            .push_opt("search", self.search.as_deref())
            .push_opt("server_id", self.server_id)
            .push_opt("online_only", self.online_only)
    }
}
