//! RoomStore port - Interface to the room document store.
//!
//! The store is an opaque document database keyed by room id. The session
//! orchestrator only needs existence checks, whole-snapshot reads, and full
//! or partial writes. The HTTP surface also lists the rooms a member has
//! joined.
//!
//! ## Consistency
//!
//! The contract offers no compare-and-swap. Two orchestrators that fetch the
//! same snapshot and write back concurrently race, and the later write wins.

use async_trait::async_trait;

use crate::domain::foundation::{MemberId, RoomId};
use crate::domain::room::{Room, RoomPatch};

/// Errors that can occur during room store operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomStoreError {
    /// No document exists for the room (it may have vanished after an
    /// existence check).
    #[error("Room not found: {0}")]
    NotFound(RoomId),

    /// The stored document could not be decoded into a room.
    #[error("Corrupt room document {room_id}: {reason}")]
    Corrupt { room_id: RoomId, reason: String },

    /// The backing store could not be reached or rejected the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A room snapshot together with its store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRoom {
    pub room_id: RoomId,
    pub room: Room,
}

/// Port for reading and writing room snapshots.
///
/// # Contract
///
/// Implementations must:
/// - Return `NotFound` from `get` and `update_fields` when the document is
///   missing, never panic
/// - Apply every field of a `RoomPatch` in a single write
/// - Leave fields absent from a patch untouched
/// - Return `recent_rooms` newest `updated_at` first
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Check whether a room document exists.
    async fn exists(&self, room_id: &RoomId) -> Result<bool, RoomStoreError>;

    /// Fetch the current snapshot of a room.
    async fn get(&self, room_id: &RoomId) -> Result<Room, RoomStoreError>;

    /// Write a full snapshot, creating the document if needed.
    async fn set(&self, room_id: &RoomId, room: &Room) -> Result<(), RoomStoreError>;

    /// Write a subset of fields onto an existing document.
    async fn update_fields(&self, room_id: &RoomId, patch: RoomPatch)
        -> Result<(), RoomStoreError>;

    /// Rooms the member is seated in, most recently updated first.
    async fn recent_rooms(&self, member_id: &MemberId) -> Result<Vec<StoredRoom>, RoomStoreError>;
}
