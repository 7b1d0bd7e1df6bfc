//! WebSocket adapters for real-time room sessions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   text frames   ┌──────────────┐   RoomAction   ┌───────────────────┐
//! │  ws_handler  │ ──────────────▶ │ RoomSession  │ ─────────────▶ │ RoomActionHandler │
//! │ (axum, I/O)  │                 │ (lifecycle)  │ ◀───────────── │ fetch/apply/write │
//! └──────────────┘                 └──────────────┘   new snapshot └───────────────────┘
//!        ▲                                │
//!        │ writer task                    │ publish
//!        │                                ▼
//! ┌──────────────┐   try_send      ┌──────────────┐   for_each_in_room   ┌────────────────────┐
//! │ outbound     │ ◀────────────── │ BroadcastHub │ ───────────────────▶ │ ConnectionRegistry │
//! │ queue (mpsc) │                 └──────────────┘                      └────────────────────┘
//! └──────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Inbound envelope decoding and server frames
//! - [`registry`] - Connection → room bindings
//! - [`hub`] - Room-scoped fan-out
//! - [`session`] - Per-connection lifecycle
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod handler;
pub mod hub;
pub mod messages;
pub mod registry;
pub mod session;

pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use hub::BroadcastHub;
pub use messages::{decode_client_frame, DecodeError, ErrorToken, ServerAction, ServerMessage};
pub use registry::{ConnectionId, ConnectionRegistry, OutboundSender};
pub use session::{RoomSession, SessionEnd, TransportError};
