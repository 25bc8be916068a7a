use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Patch;
use super::player::Player;
use crate::http::QueryParams;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qq_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTownRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qq_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<i32>,
}

impl CreateTownRequest {
    pub fn new(name: &str, level: i32) -> Self {
        Self {
            name: name.to_string(),
            level,
            ..Self::default()
        }
    }
}

/// Partial update. Membership changes go through `add_players` and
/// `remove_players`; the server enforces leadership rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTownRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub qq_group: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub leader_id: Patch<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_players: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_players: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownsListData {
    pub towns: Vec<Town>,
    pub total: i32,
    pub page: i32,
    #[serde(alias = "page_size")]
    pub size: i32,
}

/// A town with its leader and members. `leader` and `members` are only
/// populated when the detail view was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownDetailResponse {
    pub town: Town,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<Player>,
    #[serde(default)]
    pub members: Vec<Player>,
    #[serde(default)]
    pub member_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownMembersData {
    pub members: Vec<Player>,
    pub total: i32,
    pub page: i32,
    #[serde(alias = "page_size")]
    pub size: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTownsParams {
    pub page: Option<i32>,
    pub page_size: Option<i32>,
    pub search: Option<String>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

impl ListTownsParams {
    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
            .push_opt("search", self.search.as_deref())
            .push_opt("min_level", self.min_level)
            .push_opt("max_level", self.max_level)
    }
}
