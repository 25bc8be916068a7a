use crate::client::{NanManagerClient, NO_BODY};
use crate::error::ClientError;
use crate::http::QueryParams;
use crate::types::{
    BanPlayerRequest, CreatePlayerRequest, ListPlayersParams, Player, PlayersListData,
    UpdatePlayerRequest, ValidateLoginData, ValidateLoginRequest, ValidateRequest,
    ValidateResponse,
};

/// Player registry endpoints under `/api/v1/players`.
#[derive(Debug, Clone, Copy)]
pub struct PlayerService<'a> {
    client: &'a NanManagerClient,
}

impl<'a> PlayerService<'a> {
    pub(crate) fn new(client: &'a NanManagerClient) -> Self {
        Self { client }
    }

    pub fn list(&self, params: &ListPlayersParams) -> Result<PlayersListData, ClientError> {
        self.client.get("/api/v1/players", params.query())
    }

    pub fn create(&self, request: &CreatePlayerRequest) -> Result<Player, ClientError> {
        self.client.post("/api/v1/players", request)
    }

    pub fn get(&self, id: i32) -> Result<Player, ClientError> {
        self.client.get(&format!("/api/v1/players/{id}"), QueryParams::new())
    }

    pub fn update(&self, id: i32, request: &UpdatePlayerRequest) -> Result<Player, ClientError> {
        self.client.put(&format!("/api/v1/players/{id}"), request)
    }

    pub fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.client.delete(&format!("/api/v1/players/{id}"))
    }

    pub fn ban(&self, id: i32, request: &BanPlayerRequest) -> Result<(), ClientError> {
        self.client
            .post_empty(&format!("/api/v1/players/{id}/ban"), Some(request))
    }

    pub fn unban(&self, id: i32) -> Result<(), ClientError> {
        self.client
            .post_empty(&format!("/api/v1/players/{id}/unban"), NO_BODY)
    }

    /// Check a batch of joining (or leaving) players against ban and IP rules.
    pub fn validate(&self, request: &ValidateRequest) -> Result<ValidateResponse, ClientError> {
        self.client.post("/api/v1/players/validate", request)
    }

    #[deprecated(note = "use `validate`, which checks players in batches")]
    pub fn validate_login(&self, request: &ValidateLoginRequest) -> Result<ValidateLoginData, ClientError> {
        self.client.post("/api/v1/players/validate-login", request)
    }
}
