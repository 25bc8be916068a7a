use crate::client::NanManagerClient;
use crate::error::ClientError;
use crate::http::QueryParams;
use crate::types::{HeartbeatData, HeartbeatRequest, LatencyStatsData, MonitorStatsData, ServerStatus};

/// Heartbeats and monitoring statistics.
///
/// The server accepts heartbeats on two routes; older plugins post to the
/// server route, newer ones to the monitor route.
#[derive(Debug, Clone, Copy)]
pub struct MonitorService<'a> {
    client: &'a NanManagerClient,
}

impl<'a> MonitorService<'a> {
    pub(crate) fn new(client: &'a NanManagerClient) -> Self {
        Self { client }
    }

    pub fn heartbeat(
        &self,
        server_id: i32,
        request: &HeartbeatRequest,
    ) -> Result<HeartbeatData, ClientError> {
        self.client
            .post(&format!("/api/v1/monitor/{server_id}/heartbeat"), request)
    }

    pub fn server_heartbeat(
        &self,
        server_id: i32,
        request: &HeartbeatRequest,
    ) -> Result<HeartbeatData, ClientError> {
        self.client
            .post(&format!("/api/v1/servers/{server_id}/heartbeat"), request)
    }

    pub fn server_status(&self, server_id: i32) -> Result<ServerStatus, ClientError> {
        self.client
            .get(&format!("/api/v1/servers/{server_id}/status"), QueryParams::new())
    }

    pub fn latency_stats(&self, server_id: i32) -> Result<LatencyStatsData, ClientError> {
        self.client
            .get(&format!("/api/v1/servers/{server_id}/latency"), QueryParams::new())
    }

    /// Historical samples. `since` is a Unix timestamp in milliseconds and
    /// `duration` a window length in seconds; both are optional.
    pub fn stats(
        &self,
        server_id: i32,
        since: Option<i64>,
        duration: Option<i64>,
    ) -> Result<MonitorStatsData, ClientError> {
        let query = QueryParams::new()
            .push_opt("since", since)
            .push_opt("duration", duration);
        self.client
            .get(&format!("/api/v1/monitor/{server_id}/stats"), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::test_support::{body_json, envelope_ok, last_request, recording_client};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn heartbeat_returns_timing() {
        let data = json!({"received_at": 1714557600000i64, "response_at": 1714557600004i64, "expire_duration_ms": 60000});
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(data))]);
        let request = HeartbeatRequest {
            tps: Some(19.8),
            ..HeartbeatRequest::new(4, 12, 100)
        };
        let ack = client.monitor().heartbeat(4, &request).unwrap();
        assert_eq!(ack.expire_duration_ms, 60000);

        let req = last_request(&recorded);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://nan.test/api/v1/monitor/4/heartbeat");
        assert_eq!(
            body_json(&req),
            json!({"server_id": 4, "current_players": 12, "max_players": 100, "tps": 19.8})
        );
    }

    #[test]
    fn server_heartbeat_requires_data() {
        let (client, recorded) = recording_client(vec![Ok(HttpResponse::new(
            200,
            r#"{"code":0,"message":"ok","data":null}"#,
        ))]);
        let err = client
            .monitor()
            .server_heartbeat(4, &HeartbeatRequest::new(4, 0, 50))
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
        assert_eq!(
            last_request(&recorded).path,
            "http://nan.test/api/v1/servers/4/heartbeat"
        );
    }

    #[test]
    fn stats_window_is_optional() {
        let data = json!({"server_id": 4, "stats": [{"timestamp": 1714557600000i64, "current_players": 12, "tps": 20.0}]});
        let (client, recorded) = recording_client(vec![
            Ok(envelope_ok(data.clone())),
            Ok(envelope_ok(data)),
        ]);
        client.monitor().stats(4, None, None).unwrap();
        assert_eq!(last_request(&recorded).url(), "http://nan.test/api/v1/monitor/4/stats");

        let stats = client.monitor().stats(4, Some(1714550000000), Some(3600)).unwrap();
        assert_eq!(stats.stats[0].current_players, 12);
        assert_eq!(
            last_request(&recorded).url(),
            "http://nan.test/api/v1/monitor/4/stats?since=1714550000000&duration=3600"
        );
    }

    #[test]
    fn unknown_server_status_is_not_found() {
        let (client, _) = recording_client(vec![Ok(HttpResponse::new(
            404,
            r#"{"code":404,"message":"server status not found","request_id":"r-9"}"#,
        ))]);
        let err = client.monitor().server_status(99).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.request_id(), Some("r-9"));
    }

    #[test]
    fn latency_stats_decode() {
        let data = json!({
            "server_id": 4,
            "avg_latency": 12.5,
            "min_latency": 8.0,
            "max_latency": 40.0,
            "packet_loss": 0.0,
            "last_updated": "2024-05-01T10:00:00Z",
        });
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(data))]);
        let latency = client.monitor().latency_stats(4).unwrap();
        assert_eq!(latency.avg_latency, 12.5);
        assert_eq!(last_request(&recorded).path, "http://nan.test/api/v1/servers/4/latency");
    }
}
