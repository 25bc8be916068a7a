//! Canned-response transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::client::NanManagerClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub(crate) type Recorded = Arc<Mutex<Vec<HttpRequest>>>;

/// Records every request and replays queued responses in order.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    requests: Recorded,
    responses: Mutex<VecDeque<Result<HttpResponse, ClientError>>>,
}

impl Transport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no canned response".to_string())))
    }
}

pub(crate) fn recording_client(
    responses: Vec<Result<HttpResponse, ClientError>>,
) -> (NanManagerClient, Recorded) {
    let transport = RecordingTransport {
        requests: Recorded::default(),
        responses: Mutex::new(responses.into()),
    };
    let recorded = transport.requests.clone();
    let config = ClientConfig::new("http://nan.test", "test-token");
    let client = NanManagerClient::with_transport(config, transport).unwrap();
    (client, recorded)
}

pub(crate) fn envelope_ok(data: Value) -> HttpResponse {
    let body = json!({"code": 0, "message": "ok", "data": data, "request_id": "req-1"});
    HttpResponse::new(200, body.to_string())
}

pub(crate) fn last_request(recorded: &Recorded) -> HttpRequest {
    recorded
        .lock()
        .unwrap()
        .last()
        .cloned()
        .expect("no request recorded")
}

pub(crate) fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("request has no body")).unwrap()
}

pub(crate) fn player_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "in_qq_group": false,
        "in_qq_guild": false,
        "in_discord": false,
        "ban_mode": 0,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
    })
}

pub(crate) fn server_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "127.0.0.1",
        "port": 25565,
        "type": "MINECRAFT",
        "active": true,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
    })
}

pub(crate) fn town_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "level": 1,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
    })
}
