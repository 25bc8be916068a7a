use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    pub server_id: i32,
    pub current_players: i32,
    pub max_players: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtt_ms: Option<i64>,
}

impl HeartbeatRequest {
    pub fn new(server_id: i32, current_players: i32, max_players: i32) -> Self {
        Self {
            server_id,
            current_players,
            max_players,
            tps: None,
            version: None,
            motd: None,
            rtt_ms: None,
        }
    }
}

/// Server-side timestamps in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatData {
    pub received_at: i64,
    pub response_at: i64,
    /// How long the reported status stays valid without another heartbeat.
    pub expire_duration_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorStatRecord {
    pub timestamp: i64,
    pub current_players: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorStatsData {
    pub server_id: i32,
    pub stats: Vec<MonitorStatRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStatsData {
    pub server_id: i32,
    pub avg_latency: f64,
    pub min_latency: f64,
    pub max_latency: f64,
    pub packet_loss: f64,
    pub last_updated: DateTime<Utc>,
}
