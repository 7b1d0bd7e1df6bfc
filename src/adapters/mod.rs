//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Room document stores (in-memory, Redis)
//! - `auth` - Profile token resolution (HS256 JWT, mock)
//! - `websocket` - Room sessions over WebSocket
//! - `http` - REST endpoints and the assembled router

pub mod auth;
pub mod http;
pub mod storage;
pub mod websocket;

pub use storage::{InMemoryRoomStore, RedisRoomStore};
