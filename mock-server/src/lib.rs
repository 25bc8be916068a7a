//! In-memory stand-in for the NanManager service.
//!
//! Speaks the same envelope as the real server: `{code, message, data,
//! request_id}` on success and on most failures, and the legacy
//! `{detail}` shape for authentication failures.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_TOKEN: &str = "test-token";

/// Application code for a player name that is already taken.
pub const CODE_DUPLICATE_NAME: i64 = 1001;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub town_id: Option<i32>,
    pub qq: Option<String>,
    pub qqguild: Option<String>,
    pub discord: Option<String>,
    pub in_qq_group: bool,
    pub in_qq_guild: bool,
    pub in_discord: bool,
    pub ban_mode: u8,
    pub ban_expire: Option<DateTime<Utc>>,
    pub ban_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Town {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub level: i32,
    pub qq_group: Option<String>,
    pub leader_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Server {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub port: i32,
    #[serde(rename = "type")]
    pub server_type: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerStatus {
    pub id: i32,
    pub server_id: i32,
    pub is_online: bool,
    pub current_players: i32,
    pub max_players: i32,
    pub tps: Option<f64>,
    pub last_heartbeat: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreatePlayer {
    pub name: String,
    pub town_id: Option<i32>,
    pub qq: Option<String>,
    pub qqguild: Option<String>,
    pub discord: Option<String>,
    #[serde(default)]
    pub in_qq_group: bool,
    #[serde(default)]
    pub in_qq_guild: bool,
    #[serde(default)]
    pub in_discord: bool,
}

#[derive(Deserialize)]
pub struct BanPlayer {
    pub ban_mode: u8,
    pub duration_seconds: Option<i64>,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct ValidateInfo {
    pub player_name: String,
    pub ip: String,
}

#[derive(Deserialize)]
pub struct Validate {
    pub players: Vec<ValidateInfo>,
    pub server_id: i32,
    #[serde(default)]
    pub login: bool,
}

#[derive(Deserialize)]
pub struct CreateTown {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub level: i32,
    pub qq_group: Option<String>,
    pub leader_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateServer {
    pub name: String,
    pub address: String,
    pub port: i32,
    #[serde(rename = "type")]
    pub server_type: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct Heartbeat {
    pub current_players: i32,
    pub max_players: i32,
    pub tps: Option<f64>,
}

#[derive(Deserialize)]
pub struct CreateToken {
    pub name: String,
    pub role: String,
    pub description: Option<String>,
    pub expire_days: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    pub ban_mode: Option<u8>,
    pub town_id: Option<i32>,
    pub detail: Option<bool>,
}

#[derive(Default)]
pub struct Store {
    next_id: i32,
    players: BTreeMap<i32, Player>,
    towns: BTreeMap<i32, Town>,
    servers: BTreeMap<i32, Server>,
    statuses: BTreeMap<i32, ServerStatus>,
    tokens: BTreeMap<i32, Token>,
    seen_ips: BTreeSet<String>,
}

impl Store {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

/// Router accepting `DEFAULT_TOKEN`.
pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Db::default(),
    };
    let api = Router::new()
        .route("/players", get(list_players).post(create_player))
        .route("/players/validate", post(validate_players))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/players/{id}/ban", post(ban_player))
        .route("/players/{id}/unban", post(unban_player))
        .route("/towns", get(list_towns).post(create_town))
        .route(
            "/towns/{id}",
            get(get_town).put(update_town).delete(delete_town),
        )
        .route("/towns/{id}/members", get(town_members))
        .route("/servers", get(list_servers).post(create_server))
        .route(
            "/servers/{id}",
            get(get_server).put(update_server).delete(delete_server),
        )
        .route("/servers/{id}/heartbeat", post(server_heartbeat))
        .route("/servers/{id}/status", get(server_status))
        .route("/tokens", get(list_tokens).post(create_token))
        .route(
            "/tokens/{id}",
            get(get_token).put(update_token).delete(delete_token),
        )
        .route("/ips/statistics", get(ip_statistics));

    Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get("X-API-Token")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == &*state.token);
    if !authorized {
        tracing::debug!(uri = %request.uri(), "rejected request without valid token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "unauthorized"})),
        )
            .into_response();
    }
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    tracing::debug!(%method, %uri, status = response.status().as_u16(), "handled");
    response
}

fn envelope(status: StatusCode, code: i64, message: &str, data: Option<Value>) -> Response {
    let mut body = json!({
        "code": code,
        "message": message,
        "request_id": Uuid::new_v4().to_string(),
    });
    if let Some(data) = data {
        body["data"] = data;
    }
    (status, Json(body)).into_response()
}

fn ok<T: Serialize>(data: T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => envelope(StatusCode::OK, 0, "ok", Some(value)),
        Err(e) => envelope(StatusCode::INTERNAL_SERVER_ERROR, 500, &e.to_string(), None),
    }
}

fn not_found(what: &str) -> Response {
    envelope(StatusCode::NOT_FOUND, 404, &format!("{what} not found"), None)
}

fn bad_request(message: &str) -> Response {
    envelope(StatusCode::BAD_REQUEST, 400, message, None)
}

fn page_of<T: Clone>(items: &[T], query: &ListQuery) -> (Vec<T>, usize, usize, usize) {
    let page = query.page.unwrap_or(1).max(1);
    let size = query.page_size.unwrap_or(20).max(1);
    let slice = items
        .iter()
        .skip((page - 1).saturating_mul(size))
        .take(size)
        .cloned()
        .collect();
    (slice, items.len(), page, size)
}

/// Apply a nullable field of a partial update: absent leaves `slot` alone,
/// `null` clears it, anything else replaces it.
pub fn patch_nullable<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &str,
    slot: &mut Option<T>,
) -> Result<(), String> {
    match fields.get(key) {
        None => Ok(()),
        Some(Value::Null) => {
            *slot = None;
            Ok(())
        }
        Some(value) => {
            let parsed = serde_json::from_value(value.clone()).map_err(|e| format!("{key}: {e}"))?;
            *slot = Some(parsed);
            Ok(())
        }
    }
}

/// Apply a non-nullable field of a partial update.
pub fn patch_required<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &str,
    slot: &mut T,
) -> Result<(), String> {
    match fields.get(key) {
        None => Ok(()),
        Some(Value::Null) => Err(format!("{key} cannot be null")),
        Some(value) => {
            *slot = serde_json::from_value(value.clone()).map_err(|e| format!("{key}: {e}"))?;
            Ok(())
        }
    }
}

fn matches_search(name: &str, search: Option<&str>) -> bool {
    search.is_none_or(|s| name.to_lowercase().contains(&s.to_lowercase()))
}

// --- players ---

async fn list_players(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let store = state.db.read().await;
    let players: Vec<Player> = store
        .players
        .values()
        .filter(|p| matches_search(&p.name, query.search.as_deref()))
        .filter(|p| query.ban_mode.is_none_or(|mode| p.ban_mode == mode))
        .filter(|p| query.town_id.is_none_or(|town| p.town_id == Some(town)))
        .cloned()
        .collect();
    let (players, total, page, size) = page_of(&players, &query);
    ok(json!({"players": players, "total": total, "page": page, "size": size}))
}

async fn create_player(State(state): State<AppState>, Json(input): Json<CreatePlayer>) -> Response {
    let mut store = state.db.write().await;
    if store.players.values().any(|p| p.name == input.name) {
        return envelope(
            StatusCode::OK,
            CODE_DUPLICATE_NAME,
            "player name already exists",
            None,
        );
    }
    let now = Utc::now();
    let player = Player {
        id: store.allocate_id(),
        name: input.name,
        town_id: input.town_id,
        qq: input.qq,
        qqguild: input.qqguild,
        discord: input.discord,
        in_qq_group: input.in_qq_group,
        in_qq_guild: input.in_qq_guild,
        in_discord: input.in_discord,
        ban_mode: 0,
        ban_expire: None,
        ban_reason: None,
        created_at: now,
        updated_at: now,
    };
    tracing::info!(id = player.id, name = %player.name, "player created");
    store.players.insert(player.id, player.clone());
    ok(player)
}

async fn get_player(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let store = state.db.read().await;
    match store.players.get(&id) {
        Some(player) => ok(player),
        None => not_found("player"),
    }
}

fn apply_player_update(player: &mut Player, fields: &Map<String, Value>) -> Result<(), String> {
    patch_required(fields, "name", &mut player.name)?;
    patch_nullable(fields, "town_id", &mut player.town_id)?;
    patch_nullable(fields, "qq", &mut player.qq)?;
    patch_nullable(fields, "qqguild", &mut player.qqguild)?;
    patch_nullable(fields, "discord", &mut player.discord)?;
    patch_required(fields, "in_qq_group", &mut player.in_qq_group)?;
    patch_required(fields, "in_qq_guild", &mut player.in_qq_guild)?;
    patch_required(fields, "in_discord", &mut player.in_discord)?;
    Ok(())
}

async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(fields): Json<Map<String, Value>>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(player) = store.players.get_mut(&id) else {
        return not_found("player");
    };
    let mut updated = player.clone();
    if let Err(reason) = apply_player_update(&mut updated, &fields) {
        return bad_request(&reason);
    }
    updated.updated_at = Utc::now();
    *player = updated.clone();
    ok(updated)
}

async fn delete_player(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let mut store = state.db.write().await;
    if store.players.remove(&id).is_none() {
        return not_found("player");
    }
    for town in store.towns.values_mut() {
        if town.leader_id == Some(id) {
            town.leader_id = None;
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn ban_player(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<BanPlayer>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(player) = store.players.get_mut(&id) else {
        return not_found("player");
    };
    let now = Utc::now();
    player.ban_expire = match (input.ban_mode, input.duration_seconds) {
        (1, Some(seconds)) if seconds > 0 => Some(now + Duration::seconds(seconds)),
        (1, _) => return bad_request("temporary ban requires a positive duration_seconds"),
        (2, _) => None,
        _ => return bad_request("ban_mode must be 1 or 2"),
    };
    player.ban_mode = input.ban_mode;
    player.ban_reason = Some(input.reason);
    player.updated_at = now;
    ok(Value::Null)
}

async fn unban_player(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let mut store = state.db.write().await;
    let Some(player) = store.players.get_mut(&id) else {
        return not_found("player");
    };
    player.ban_mode = 0;
    player.ban_expire = None;
    player.ban_reason = None;
    player.updated_at = Utc::now();
    ok(Value::Null)
}

async fn validate_players(State(state): State<AppState>, Json(input): Json<Validate>) -> Response {
    let mut store = state.db.write().await;
    if !store.servers.contains_key(&input.server_id) {
        return not_found("server");
    }
    let now = Utc::now();
    let mut results = Vec::with_capacity(input.players.len());
    for info in &input.players {
        store.seen_ips.insert(info.ip.clone());
        let player = store.players.values().find(|p| p.name == info.player_name);
        let result = match player {
            None => json!({"player_name": info.player_name, "allowed": input.login, "newbie": true}),
            Some(p) => {
                let banned = match p.ban_mode {
                    0 => false,
                    1 => p.ban_expire.is_some_and(|expire| expire > now),
                    _ => true,
                };
                let mut result = json!({
                    "player_name": p.name,
                    "allowed": !banned,
                    "player_id": p.id,
                    "newbie": false,
                });
                if banned {
                    result["reason"] = json!(p.ban_reason.clone().unwrap_or_else(|| "banned".to_string()));
                }
                result
            }
        };
        results.push(result);
    }
    ok(json!({"results": results, "processed_at": now.timestamp_millis()}))
}

// --- towns ---

async fn list_towns(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let store = state.db.read().await;
    let towns: Vec<Town> = store
        .towns
        .values()
        .filter(|t| matches_search(&t.name, query.search.as_deref()))
        .cloned()
        .collect();
    let (towns, total, page, size) = page_of(&towns, &query);
    ok(json!({"towns": towns, "total": total, "page": page, "size": size}))
}

async fn create_town(State(state): State<AppState>, Json(input): Json<CreateTown>) -> Response {
    let mut store = state.db.write().await;
    if let Some(leader) = input.leader_id {
        if !store.players.contains_key(&leader) {
            return not_found("leader");
        }
    }
    let now = Utc::now();
    let town = Town {
        id: store.allocate_id(),
        name: input.name,
        description: input.description,
        level: input.level,
        qq_group: input.qq_group,
        leader_id: input.leader_id,
        created_at: now,
        updated_at: now,
    };
    if let Some(leader) = town.leader_id.and_then(|id| store.players.get_mut(&id)) {
        leader.town_id = Some(town.id);
    }
    store.towns.insert(town.id, town.clone());
    ok(town)
}

fn members_of(store: &Store, town_id: i32) -> Vec<Player> {
    store
        .players
        .values()
        .filter(|p| p.town_id == Some(town_id))
        .cloned()
        .collect()
}

async fn get_town(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<ListQuery>,
) -> Response {
    let store = state.db.read().await;
    let Some(town) = store.towns.get(&id) else {
        return not_found("town");
    };
    if !query.detail.unwrap_or(false) {
        return ok(json!({"town": town}));
    }
    let members = members_of(&store, id);
    let leader = town.leader_id.and_then(|leader| store.players.get(&leader));
    ok(json!({
        "town": town,
        "leader": leader,
        "member_count": members.len(),
        "members": members,
    }))
}

async fn update_town(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(fields): Json<Map<String, Value>>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(mut town) = store.towns.get(&id).cloned() else {
        return not_found("town");
    };
    let mut add: Option<Vec<i32>> = None;
    let mut remove: Option<Vec<i32>> = None;
    let applied = patch_required(&fields, "name", &mut town.name)
        .and_then(|_| patch_nullable(&fields, "description", &mut town.description))
        .and_then(|_| patch_required(&fields, "level", &mut town.level))
        .and_then(|_| patch_nullable(&fields, "qq_group", &mut town.qq_group))
        .and_then(|_| patch_nullable(&fields, "leader_id", &mut town.leader_id))
        .and_then(|_| patch_nullable(&fields, "add_players", &mut add))
        .and_then(|_| patch_nullable(&fields, "remove_players", &mut remove));
    if let Err(reason) = applied {
        return bad_request(&reason);
    }
    let referenced = add.iter().flatten().chain(town.leader_id.iter());
    for player_id in referenced {
        if !store.players.contains_key(player_id) {
            return not_found("player");
        }
    }

    for player_id in add.unwrap_or_default() {
        if let Some(player) = store.players.get_mut(&player_id) {
            player.town_id = Some(id);
        }
    }
    for player_id in remove.unwrap_or_default() {
        if let Some(player) = store.players.get_mut(&player_id) {
            if player.town_id == Some(id) {
                player.town_id = None;
            }
        }
        if town.leader_id == Some(player_id) {
            town.leader_id = None;
        }
    }
    town.updated_at = Utc::now();
    store.towns.insert(id, town.clone());
    ok(town)
}

async fn delete_town(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let mut store = state.db.write().await;
    if store.towns.remove(&id).is_none() {
        return not_found("town");
    }
    for player in store.players.values_mut() {
        if player.town_id == Some(id) {
            player.town_id = None;
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn town_members(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<ListQuery>,
) -> Response {
    let store = state.db.read().await;
    if !store.towns.contains_key(&id) {
        return not_found("town");
    }
    let (members, total, page, size) = page_of(&members_of(&store, id), &query);
    ok(json!({"members": members, "total": total, "page": page, "size": size}))
}

// --- servers ---

async fn list_servers(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let store = state.db.read().await;
    let servers: Vec<Server> = store
        .servers
        .values()
        .filter(|s| matches_search(&s.name, query.search.as_deref()))
        .cloned()
        .collect();
    let (servers, total, page, size) = page_of(&servers, &query);
    ok(json!({"servers": servers, "total": total, "page": page, "size": size}))
}

async fn create_server(State(state): State<AppState>, Json(input): Json<CreateServer>) -> Response {
    if !matches!(input.server_type.as_str(), "MINECRAFT" | "PROXY" | "LOBBY") {
        return bad_request("type must be MINECRAFT, PROXY or LOBBY");
    }
    let mut store = state.db.write().await;
    let now = Utc::now();
    let server = Server {
        id: store.allocate_id(),
        name: input.name,
        address: input.address,
        port: input.port,
        server_type: input.server_type,
        description: input.description,
        active: true,
        created_at: now,
        updated_at: now,
    };
    store.servers.insert(server.id, server.clone());
    ok(server)
}

async fn get_server(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let store = state.db.read().await;
    match store.servers.get(&id) {
        Some(server) => ok(server),
        None => not_found("server"),
    }
}

async fn update_server(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(fields): Json<Map<String, Value>>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(server) = store.servers.get_mut(&id) else {
        return not_found("server");
    };
    let mut updated = server.clone();
    let applied = patch_required(&fields, "name", &mut updated.name)
        .and_then(|_| patch_required(&fields, "address", &mut updated.address))
        .and_then(|_| patch_required(&fields, "port", &mut updated.port))
        .and_then(|_| patch_required(&fields, "type", &mut updated.server_type))
        .and_then(|_| patch_nullable(&fields, "description", &mut updated.description))
        .and_then(|_| patch_required(&fields, "active", &mut updated.active));
    if let Err(reason) = applied {
        return bad_request(&reason);
    }
    updated.updated_at = Utc::now();
    *server = updated.clone();
    ok(updated)
}

async fn delete_server(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let mut store = state.db.write().await;
    if store.servers.remove(&id).is_none() {
        return not_found("server");
    }
    store.statuses.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}

/// Status reports stay valid for this long without another heartbeat.
const HEARTBEAT_EXPIRE_MS: i64 = 60_000;

async fn server_heartbeat(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<Heartbeat>,
) -> Response {
    let received = Utc::now();
    let mut store = state.db.write().await;
    if !store.servers.contains_key(&id) {
        return not_found("server");
    }
    let status = store.statuses.entry(id).or_insert_with(|| ServerStatus {
        id,
        server_id: id,
        is_online: true,
        current_players: 0,
        max_players: 0,
        tps: None,
        last_heartbeat: received,
        created_at: received,
        updated_at: received,
    });
    status.is_online = true;
    status.current_players = input.current_players;
    status.max_players = input.max_players;
    status.tps = input.tps;
    status.last_heartbeat = received;
    status.updated_at = received;
    ok(json!({
        "received_at": received.timestamp_millis(),
        "response_at": Utc::now().timestamp_millis(),
        "expire_duration_ms": HEARTBEAT_EXPIRE_MS,
    }))
}

async fn server_status(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let store = state.db.read().await;
    match store.statuses.get(&id) {
        Some(status) => ok(status),
        None => not_found("server status"),
    }
}

// --- tokens ---

async fn list_tokens(State(state): State<AppState>) -> Response {
    let store = state.db.read().await;
    let tokens: Vec<&Token> = store.tokens.values().collect();
    ok(json!({"total": tokens.len(), "tokens": tokens}))
}

async fn create_token(State(state): State<AppState>, Json(input): Json<CreateToken>) -> Response {
    let mut store = state.db.write().await;
    let now = Utc::now();
    let token = Token {
        id: store.allocate_id(),
        name: input.name,
        role: input.role,
        description: input.description,
        expires_at: input.expire_days.map(|days| now + Duration::days(days)),
        created_at: now,
        updated_at: now,
    };
    store.tokens.insert(token.id, token.clone());
    let token_value = format!("nan_{}", Uuid::new_v4().simple());
    ok(json!({"token": token, "token_value": token_value}))
}

async fn get_token(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let store = state.db.read().await;
    match store.tokens.get(&id) {
        Some(token) => ok(token),
        None => not_found("token"),
    }
}

async fn update_token(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(fields): Json<Map<String, Value>>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(token) = store.tokens.get_mut(&id) else {
        return not_found("token");
    };
    let mut updated = token.clone();
    let mut expire_days: Option<i64> = updated
        .expires_at
        .map(|at| (at - updated.created_at).num_days());
    let applied = patch_required(&fields, "name", &mut updated.name)
        .and_then(|_| patch_nullable(&fields, "description", &mut updated.description))
        .and_then(|_| patch_nullable(&fields, "expire_days", &mut expire_days));
    if let Err(reason) = applied {
        return bad_request(&reason);
    }
    let now = Utc::now();
    if fields.contains_key("expire_days") {
        updated.expires_at = expire_days.map(|days| now + Duration::days(days));
    }
    updated.updated_at = now;
    *token = updated.clone();
    ok(updated)
}

async fn delete_token(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let mut store = state.db.write().await;
    match store.tokens.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("token"),
    }
}

// --- ips ---

async fn ip_statistics(State(state): State<AppState>) -> Response {
    let store = state.db.read().await;
    ok(json!({
        "total_ips": store.seen_ips.len(),
        "banned_ips": 0,
        "suspicious_ips": 0,
        "high_risk_ips": 0,
        "proxy_ips": 0,
        "vpn_ips": 0,
        "tor_ips": 0,
    }))
}
