use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::ThreatLevel;
use crate::http::QueryParams;

/// Reputation record for one address. Risk fields are computed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInfo {
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    pub is_proxy: bool,
    pub is_vpn: bool,
    pub is_tor: bool,
    pub threat_level: ThreatLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<i32>,
    pub is_banned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub risk_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanIpRequest {
    pub ips: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbanIpRequest {
    pub ips: Vec<String>,
}

/// A page of IP records (banned, suspicious, high-risk or filtered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpListData {
    pub ips: Vec<IpInfo>,
    pub total: i64,
    pub page: i32,
    #[serde(alias = "page_size")]
    pub size: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpStatistics {
    pub total_ips: i64,
    pub banned_ips: i64,
    #[serde(default)]
    pub suspicious_ips: i64,
    pub high_risk_ips: i64,
    pub proxy_ips: i64,
    pub vpn_ips: i64,
    pub tor_ips: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIpsParams {
    pub page: Option<i32>,
    pub page_size: Option<i32>,
    pub banned_only: Option<bool>,
    pub min_threat_level: Option<ThreatLevel>,
    pub min_risk_score: Option<i32>,
}

impl ListIpsParams {
    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
            .push_opt("banned_only", self.banned_only)
            .push_opt("min_threat_level", self.min_threat_level)
            .push_opt("min_risk_score", self.min_risk_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ip_info_accepts_named_threat_level() {
        let info: IpInfo = serde_json::from_value(json!({
            "ip": "203.0.113.9",
            "is_proxy": false,
            "is_vpn": true,
            "is_tor": false,
            "threat_level": "medium",
            "is_banned": false,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
            "risk_level": "medium",
            "risk_description": "VPN exit",
        }))
        .unwrap();
        assert_eq!(info.threat_level, ThreatLevel::Medium);
        assert!(info.is_vpn);
    }

    #[test]
    fn threat_filter_is_numeric() {
        let params = ListIpsParams {
            banned_only: Some(true),
            min_threat_level: Some(ThreatLevel::High),
            ..ListIpsParams::default()
        };
        assert_eq!(
            params.query().to_query_string(),
            "banned_only=true&min_threat_level=2"
        );
    }
}
