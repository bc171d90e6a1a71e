//! Online rooms for Jornada.
//!
//! The backend is whatever implements [`RoomStore`]: three tables (rooms,
//! players, game state) keyed by room id, plus a per-room change feed. The
//! in-process [`MemoryStore`] runs as an actor task and is what tests and
//! local hosting use.
//!
//! # Key types
//!
//! - [`RoomStore`]: the backend boundary
//! - [`MemoryStore`]: in-memory store actor behind a clonable handle
//! - [`RoomClient`]: create / join / start rooms
//! - [`RoomSubscription`]: re-derives a full [`RoomSnapshot`] on every change
//! - [`OnlineGame`]: drives a turn engine and mirrors it into the store
//! - [`RoomConfig`]: seat limits and code generation settings

#![allow(async_fn_in_trait)]

mod client;
mod config;
mod error;
mod memory;
mod online;
mod store;
mod sync;

pub use client::{RoomClient, RoomMembership, generate_room_code};
pub use config::RoomConfig;
pub use error::RoomError;
pub use memory::MemoryStore;
pub use online::OnlineGame;
pub use store::{NewPlayer, NewRoom, RoomStore};
pub use sync::{RoomSnapshot, RoomSubscription, RoomUpdate};
