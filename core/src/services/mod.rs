//! Per-resource endpoint bindings.
//!
//! Each service borrows the client and maps one method to one endpoint. They
//! share the client's transport, headers and decoder and hold no state.

mod ips;
mod monitor;
mod player_servers;
mod players;
mod servers;
mod tokens;
mod towns;

pub use ips::IpService;
pub use monitor::MonitorService;
pub use player_servers::PlayerServerService;
pub use players::PlayerService;
pub use servers::ServerService;
pub use tokens::TokenService;
pub use towns::TownService;
