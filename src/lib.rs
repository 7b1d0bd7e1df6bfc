//! Planning Poker - Real-time estimation rooms
//!
//! Participants join a room over a WebSocket, pick cards, reveal them
//! together and reset for the next round. Every change is persisted to a
//! room document store and the new snapshot is broadcast to everyone in
//! the room.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
