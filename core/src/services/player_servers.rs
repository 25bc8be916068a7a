use crate::client::NanManagerClient;
use crate::error::ClientError;
use crate::http::QueryParams;
use crate::types::{
    OnlinePlayersParams, Pagination, PlayerServersData, ServerPlayersData, ServerPlayersParams,
    SetPlayersOfflineRequest,
};

/// Player/server relationship endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PlayerServerService<'a> {
    client: &'a NanManagerClient,
}

impl<'a> PlayerServerService<'a> {
    pub(crate) fn new(client: &'a NanManagerClient) -> Self {
        Self { client }
    }

    /// Servers a player has joined. `online_only` is omitted when `None`.
    pub fn player_servers(
        &self,
        player_id: i32,
        online_only: Option<bool>,
    ) -> Result<PlayerServersData, ClientError> {
        self.client.get(
            &format!("/api/v1/players/{player_id}/servers"),
            QueryParams::new().push_opt("online_only", online_only),
        )
    }

    pub fn server_players(
        &self,
        server_id: i32,
        page: &Pagination,
    ) -> Result<ServerPlayersData, ClientError> {
        self.client
            .get(&format!("/api/v1/servers/{server_id}/players"), page.query())
    }

    pub fn online_players(&self, params: &OnlinePlayersParams) -> Result<ServerPlayersData, ClientError> {
        self.client.get("/api/v1/online-players", params.query())
    }

    /// Player/server records across every server.
    pub fn server_players_global(
        &self,
        params: &ServerPlayersParams,
    ) -> Result<ServerPlayersData, ClientError> {
        self.client.get("/api/v1/server-players", params.query())
    }

    /// Mark players offline on one server, e.g. after a crash.
    pub fn set_players_offline(&self, server_id: i32, player_ids: &[i32]) -> Result<(), ClientError> {
        let request = SetPlayersOfflineRequest {
            server_id,
            player_ids: player_ids.to_vec(),
        };
        self.client
            .post_empty("/api/v1/servers/players/offline", Some(&request))
    }
}
