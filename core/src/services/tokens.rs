use crate::client::NanManagerClient;
use crate::error::ClientError;
use crate::http::QueryParams;
use crate::types::{
    ApiToken, CreateApiTokenData, CreateApiTokenRequest, ListApiTokensData, UpdateApiTokenRequest,
};

/// API token endpoints under `/api/v1/tokens`.
#[derive(Debug, Clone, Copy)]
pub struct TokenService<'a> {
    client: &'a NanManagerClient,
}

impl<'a> TokenService<'a> {
    pub(crate) fn new(client: &'a NanManagerClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<ListApiTokensData, ClientError> {
        self.client.get("/api/v1/tokens", QueryParams::new())
    }

    pub fn create(&self, request: &CreateApiTokenRequest) -> Result<CreateApiTokenData, ClientError> {
        self.client.post("/api/v1/tokens", request)
    }

    pub fn get(&self, id: i32) -> Result<ApiToken, ClientError> {
        self.client.get(&format!("/api/v1/tokens/{id}"), QueryParams::new())
    }

    pub fn update(&self, id: i32, request: &UpdateApiTokenRequest) -> Result<ApiToken, ClientError> {
        self.client.put(&format!("/api/v1/tokens/{id}"), request)
    }

    pub fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.client.delete(&format!("/api/v1/tokens/{id}"))
    }
}
