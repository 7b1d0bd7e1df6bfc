//! Connection registry for room-scoped message routing.
//!
//! Every live socket is registered with the room it was opened for and the
//! sending half of its outbound queue.
//!
//! # Architecture
//!
//! ```text
//! Room: abcde-…        Room: fghij-…
//! ├── conn-a (u1)      ├── conn-d (u4)
//! ├── conn-b (u2)      └── conn-e (u1)
//! └── conn-c (guest)
//! ```
//!
//! A member may hold several connections, in one room or many.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::domain::foundation::{MemberId, RoomId};

/// Sending half of a connection's bounded outbound queue.
///
/// Frames are pre-serialized and shared between recipients.
pub type OutboundSender = mpsc::Sender<Arc<str>>;

/// Unique identifier for a WebSocket connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct Connection {
    room_id: RoomId,
    member_id: MemberId,
    sender: OutboundSender,
}

/// Tracks every live connection and the room it is bound to.
///
/// # Thread Safety
///
/// A single `RwLock` guards the map, so register, deregister and iteration
/// are linearizable: an iteration sees a connection either fully registered
/// or not at all. Broadcasts take the read side and run concurrently.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Connection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a connection to a room.
    ///
    /// Re-registering an id replaces its previous binding.
    pub async fn register(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        member_id: MemberId,
        sender: OutboundSender,
    ) {
        self.connections.write().await.insert(
            connection_id,
            Connection {
                room_id,
                member_id,
                sender,
            },
        );
    }

    /// Remove a connection. Returns false if it was not registered.
    ///
    /// The registry's copy of the sender is dropped here.
    pub async fn deregister(&self, connection_id: &ConnectionId) -> bool {
        self.connections.write().await.remove(connection_id).is_some()
    }

    /// Visit every connection bound to `room_id`.
    ///
    /// `f` runs under the read lock and must not block.
    pub async fn for_each_in_room<F>(&self, room_id: &RoomId, mut f: F)
    where
        F: FnMut(&ConnectionId, &MemberId, &OutboundSender),
    {
        let connections = self.connections.read().await;
        for (id, conn) in connections.iter().filter(|(_, c)| &c.room_id == room_id) {
            f(id, &conn.member_id, &conn.sender);
        }
    }

    /// Number of connections bound to a room (0 if none).
    pub async fn connection_count(&self, room_id: &RoomId) -> usize {
        self.connections
            .read()
            .await
            .values()
            .filter(|c| &c.room_id == room_id)
            .count()
    }

    /// Total connections across all rooms.
    pub async fn total_connections(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Rooms with at least one live connection.
    pub async fn active_rooms(&self) -> Vec<RoomId> {
        let connections = self.connections.read().await;
        let rooms: HashSet<&RoomId> = connections.values().map(|c| &c.room_id).collect();
        rooms.into_iter().cloned().collect()
    }
}
