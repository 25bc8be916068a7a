use crate::client::NanManagerClient;
use crate::error::ClientError;
use crate::http::QueryParams;
use crate::types::{
    CreateTownRequest, ListTownsParams, Pagination, Town, TownDetailResponse, TownMembersData,
    TownsListData, UpdateTownRequest,
};

/// Town registry endpoints under `/api/v1/towns`.
#[derive(Debug, Clone, Copy)]
pub struct TownService<'a> {
    client: &'a NanManagerClient,
}

impl<'a> TownService<'a> {
    pub(crate) fn new(client: &'a NanManagerClient) -> Self {
        Self { client }
    }

    pub fn list(&self, params: &ListTownsParams) -> Result<TownsListData, ClientError> {
        self.client.get("/api/v1/towns", params.query())
    }

    pub fn create(&self, request: &CreateTownRequest) -> Result<Town, ClientError> {
        self.client.post("/api/v1/towns", request)
    }

    /// With `detail`, the response also carries the leader and members.
    pub fn get(&self, id: i32, detail: bool) -> Result<TownDetailResponse, ClientError> {
        let query = if detail {
            QueryParams::new().push("detail", true)
        } else {
            QueryParams::new()
        };
        self.client.get(&format!("/api/v1/towns/{id}"), query)
    }

    pub fn update(&self, id: i32, request: &UpdateTownRequest) -> Result<Town, ClientError> {
        self.client.put(&format!("/api/v1/towns/{id}"), request)
    }

    pub fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.client.delete(&format!("/api/v1/towns/{id}"))
    }

    pub fn members(&self, id: i32, page: &Pagination) -> Result<TownMembersData, ClientError> {
        self.client
            .get(&format!("/api/v1/towns/{id}/members"), page.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{envelope_ok, last_request, player_json, recording_client, town_json};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn get_only_sends_detail_when_requested() {
        let (client, recorded) = recording_client(vec![
            Ok(envelope_ok(json!({"town": town_json(1, "Riverside")}))),
            Ok(envelope_ok(json!({
                "town": town_json(1, "Riverside"),
                "leader": player_json(2, "Mayor"),
                "members": [player_json(2, "Mayor")],
                "member_count": 1,
            }))),
        ]);

        let plain = client.towns().get(1, false).unwrap();
        assert!(plain.leader.is_none());
        assert_eq!(last_request(&recorded).url(), "http://nan.test/api/v1/towns/1");

        let detail = client.towns().get(1, true).unwrap();
        assert_eq!(detail.member_count, 1);
        assert_eq!(detail.leader.unwrap().name, "Mayor");
        assert_eq!(
            last_request(&recorded).url(),
            "http://nan.test/api/v1/towns/1?detail=true"
        );
    }

    #[test]
    fn members_paginate() {
        let data = json!({"members": [player_json(3, "Alex")], "total": 11, "page": 2, "size": 10});
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(data))]);
        let members = client.towns().members(7, &Pagination::new(2, 10)).unwrap();
        assert_eq!(members.total, 11);
        assert_eq!(
            last_request(&recorded).url(),
            "http://nan.test/api/v1/towns/7/members?page=2&page_size=10"
        );
    }

    #[test]
    fn list_level_range() {
        let data = json!({"towns": [town_json(1, "Riverside")], "total": 1, "page": 1, "size": 20});
        let (client, recorded) = recording_client(vec![Ok(envelope_ok(data))]);
        let params = ListTownsParams {
            min_level: Some(1),
            ..ListTownsParams::default()
        };
        let towns = client.towns().list(&params).unwrap();
        assert_eq!(towns.towns[0].name, "Riverside");
        assert_eq!(
            last_request(&recorded).url(),
            "http://nan.test/api/v1/towns?min_level=1"
        );
    }
}
