use crate::client::NanManagerClient;
use crate::error::ClientError;
use crate::http::QueryParams;
use crate::types::{
    CreateServerRequest, ListServersParams, ServerDetailData, ServerRegistry, ServersListData,
    UpdateServerRequest,
};

/// Server registry endpoints under `/api/v1/servers`.
#[derive(Debug, Clone, Copy)]
pub struct ServerService<'a> {
    client: &'a NanManagerClient,
}

impl<'a> ServerService<'a> {
    pub(crate) fn new(client: &'a NanManagerClient) -> Self {
        Self { client }
    }

    pub fn list(&self, params: &ListServersParams) -> Result<ServersListData, ClientError> {
        self.client.get("/api/v1/servers", params.query())
    }

    pub fn create(&self, request: &CreateServerRequest) -> Result<ServerRegistry, ClientError> {
        self.client.post("/api/v1/servers", request)
    }

    pub fn get(&self, id: i32) -> Result<ServerRegistry, ClientError> {
        self.client.get(&format!("/api/v1/servers/{id}"), QueryParams::new())
    }

    pub fn update(&self, id: i32, request: &UpdateServerRequest) -> Result<ServerRegistry, ClientError> {
        self.client.put(&format!("/api/v1/servers/{id}"), request)
    }

    pub fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.client.delete(&format!("/api/v1/servers/{id}"))
    }

    /// Registry entry together with its latest status, if any.
    pub fn detail(&self, id: i32) -> Result<ServerDetailData, ClientError> {
        self.client
            .get(&format!("/api/v1/servers/{id}/detail"), QueryParams::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::test_support::{body_json, envelope_ok, last_request, recording_client, server_json};
    use crate::types::{Patch, ServerType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn list_with_online_flag() {
        let data = json!({"servers": [server_json(1, "survival")], "total": 1, "page": 1, "size": 10});
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(data))]);
        let params = ListServersParams {
            search: Some("surv".to_string()),
            online_only: Some(true),
            ..ListServersParams::default()
        };
        let list = client.servers().list(&params).unwrap();
        assert_eq!(list.servers[0].server_type, ServerType::Minecraft);
        assert_eq!(
            last_request(&recorded).url(),
            "http://nan.test/api/v1/servers?search=surv&online_only=true"
        );
    }

    #[test]
    fn update_can_clear_description() {
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(server_json(2, "lobby")))]);
        let update = UpdateServerRequest {
            description: Patch::Clear,
            active: Some(false),
            ..UpdateServerRequest::default()
        };
        client.servers().update(2, &update).unwrap();
        let req = last_request(&recorded);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(body_json(&req), json!({"description": null, "active": false}));
    }

    #[test]
    fn detail_without_status() {
        let data = json!({"server": server_json(5, "proxy")});
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(data))]);
        let detail = client.servers().detail(5).unwrap();
        assert_eq!(detail.server.id, 5);
        assert!(detail.status.is_none());
        assert_eq!(
            last_request(&recorded).path,
            "http://nan.test/api/v1/servers/5/detail"
        );
    }
}
