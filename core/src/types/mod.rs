//! DTOs for the NanManager API.
//!
//! # Design
//! Response records are snapshots decoded fresh per call. Optional server
//! columns are `Option` and are left off the wire when absent. Update
//! requests use `Patch` for nullable columns so that "leave unchanged",
//! "clear" and "set" stay distinct.

pub mod common;
pub mod ip;
pub mod monitor;
pub mod player;
pub mod server;
pub mod token;
pub mod town;

pub use common::{BanMode, Pagination, Patch, ServerType, ThreatLevel};
pub use ip::*;
pub use monitor::*;
pub use player::*;
pub use server::*;
pub use token::*;
pub use town::*;
