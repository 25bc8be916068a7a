//! The NanManager API client.
//!
//! # Design
//! `NanManagerClient` holds immutable configuration only: the base URL, the
//! fixed header set and a shared `Transport`. Each call builds an
//! `HttpRequest`, sends it once, and runs the response through
//! `envelope::decode`. There is no retry loop and no cache, so one client can
//! be cloned and shared freely across threads.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, QueryParams};
use crate::services::{
    IpService, MonitorService, PlayerServerService, PlayerService, ServerService, TokenService,
    TownService,
};
use crate::transport::{Transport, UreqTransport};

/// Placeholder body type for requests without a payload.
pub(crate) const NO_BODY: Option<&()> = None;

/// Stateless client for the NanManager API.
#[derive(Clone)]
pub struct NanManagerClient {
    base_url: String,
    headers: Vec<(String, String)>,
    debug: bool,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for NanManagerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NanManagerClient")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl NanManagerClient {
    /// Build a client that sends requests through a `ureq` agent configured
    /// from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, transport)
    }

    /// Build a client around a caller-supplied transport.
    pub fn with_transport<T>(config: ClientConfig, transport: T) -> Result<Self, ClientError>
    where
        T: Transport + 'static,
    {
        config.validate()?;
        let headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", config.token)),
            ("X-API-Token".to_string(), config.token.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), config.user_agent.clone()),
        ];
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
            debug: config.debug,
            transport: Arc::new(transport),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn players(&self) -> PlayerService<'_> {
        PlayerService::new(self)
    }

    pub fn servers(&self) -> ServerService<'_> {
        ServerService::new(self)
    }

    pub fn towns(&self) -> TownService<'_> {
        TownService::new(self)
    }

    pub fn tokens(&self) -> TokenService<'_> {
        TokenService::new(self)
    }

    pub fn ips(&self) -> IpService<'_> {
        IpService::new(self)
    }

    pub fn player_servers(&self) -> PlayerServerService<'_> {
        PlayerServerService::new(self)
    }

    pub fn monitor(&self) -> MonitorService<'_> {
        MonitorService::new(self)
    }

    /// Build a request for `path` (relative to the base URL) carrying the
    /// fixed headers and, if given, a JSON body.
    pub fn build_request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: QueryParams,
        body: Option<&B>,
    ) -> Result<HttpRequest, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{}", self.base_url, path),
            query,
            headers: self.headers.clone(),
            body,
        })
    }

    /// Send a request and decode its `data` payload.
    pub fn call<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<T, ClientError> {
        let response = self.execute(request)?;
        envelope::decode(&response)
    }

    /// Send a request whose success carries no payload.
    pub fn call_empty(&self, request: &HttpRequest) -> Result<(), ClientError> {
        let response = self.execute(request)?;
        envelope::decode_empty(&response)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str, query: QueryParams) -> Result<T, ClientError> {
        let request = self.build_request(HttpMethod::Get, path, query, NO_BODY)?;
        self.call(&request)
    }

    pub(crate) fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Post, path, QueryParams::new(), Some(body))?;
        self.call(&request)
    }

    pub(crate) fn post_empty<B>(&self, path: &str, body: Option<&B>) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(HttpMethod::Post, path, QueryParams::new(), body)?;
        self.call_empty(&request)
    }

    pub(crate) fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Put, path, QueryParams::new(), Some(body))?;
        self.call(&request)
    }

    pub(crate) fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.build_request(HttpMethod::Delete, path, QueryParams::new(), NO_BODY)?;
        self.call_empty(&request)
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let url = request.url();
        debug!(method = request.method.as_str(), %url, "sending request");
        if self.debug {
            if let Some(body) = &request.body {
                debug!(body = %String::from_utf8_lossy(body), "request body");
            }
        }

        let started = Instant::now();
        match self.transport.send(request) {
            Ok(response) => {
                debug!(
                    status = response.status,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "received response"
                );
                if self.debug {
                    debug!(body = %response.body_text(), "response body");
                }
                Ok(response)
            }
            Err(err) => {
                warn!(method = request.method.as_str(), %url, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{envelope_ok, player_json, recording_client, RecordingTransport};
    use crate::types::Player;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fixed_headers_are_attached() {
        let (client, _) = recording_client(vec![]);
        let req = client
            .build_request(HttpMethod::Get, "/api/v1/players", QueryParams::new(), NO_BODY)
            .unwrap();
        assert_eq!(req.header("Authorization"), Some("Bearer test-token"));
        assert_eq!(req.header("X-API-Token"), Some("test-token"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert!(req.header("User-Agent").unwrap().starts_with("NewNanManager-Rust-SDK/"));
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:8080/", "t");
        let client = NanManagerClient::with_transport(config, RecordingTransport::default()).unwrap();
        let req = client
            .build_request(HttpMethod::Get, "/api/v1/towns", QueryParams::new(), NO_BODY)
            .unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/v1/towns");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ClientConfig::new("http://localhost:8080", "");
        let err = NanManagerClient::with_transport(config, RecordingTransport::default()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn body_is_json() {
        let (client, _) = recording_client(vec![]);
        let req = client
            .build_request(
                HttpMethod::Post,
                "/api/v1/players",
                QueryParams::new(),
                Some(&json!({"name": "Alex"})),
            )
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Alex"}));
    }

    #[test]
    fn call_decodes_payload() {
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(player_json(1, "Steve")))]);
        let req = client
            .build_request(HttpMethod::Get, "/api/v1/players/1", QueryParams::new(), NO_BODY)
            .unwrap();
        let player: Player = client.call(&req).unwrap();
        assert_eq!(player.name, "Steve");
        assert_eq!(recorded.lock().unwrap().len(), 1);
    }

    #[test]
    fn transport_error_is_propagated_untouched() {
        let (client, _) = recording_client(vec![Err(ClientError::Transport(
            "connection refused".to_string(),
        ))]);
        let err = client.players().get(1).unwrap_err();
        assert_eq!(err, ClientError::Transport("connection refused".to_string()));
    }

    #[test]
    fn clones_share_configuration() {
        let (client, recorded) = recording_client(vec![
            Ok(HttpResponse::new(204, "")),
            Ok(HttpResponse::new(204, "")),
        ]);
        let other = client.clone();
        client.players().delete(1).unwrap();
        other.players().delete(2).unwrap();
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded[0].headers, recorded[1].headers);
    }
}
