//! In-Memory Room Store Adapter
//!
//! Stores room snapshots in memory.
//! Useful for testing and single-process development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{MemberId, RoomId};
use crate::domain::room::{Room, RoomPatch};
use crate::ports::{RoomStore, RoomStoreError, StoredRoom};

/// In-memory storage for room documents
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomStore {
    rooms: Arc<RwLock<HashMap<RoomId, Room>>>,
}

impl InMemoryRoomStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one room (useful for tests)
    pub async fn with_room(room_id: RoomId, room: Room) -> Self {
        let store = Self::new();
        store.rooms.write().await.insert(room_id, room);
        store
    }

    /// Remove a room, simulating disposal by the storage engine
    pub async fn remove(&self, room_id: &RoomId) -> Option<Room> {
        self.rooms.write().await.remove(room_id)
    }

    /// Get the number of stored rooms
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn exists(&self, room_id: &RoomId) -> Result<bool, RoomStoreError> {
        Ok(self.rooms.read().await.contains_key(room_id))
    }

    async fn get(&self, room_id: &RoomId) -> Result<Room, RoomStoreError> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .ok_or_else(|| RoomStoreError::NotFound(room_id.clone()))
    }

    async fn set(&self, room_id: &RoomId, room: &Room) -> Result<(), RoomStoreError> {
        self.rooms
            .write()
            .await
            .insert(room_id.clone(), room.clone());
        Ok(())
    }

    async fn update_fields(
        &self,
        room_id: &RoomId,
        patch: RoomPatch,
    ) -> Result<(), RoomStoreError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomStoreError::NotFound(room_id.clone()))?;
        room.apply_patch(patch);
        Ok(())
    }

    async fn recent_rooms(&self, member_id: &MemberId) -> Result<Vec<StoredRoom>, RoomStoreError> {
        let mut joined: Vec<StoredRoom> = self
            .rooms
            .read()
            .await
            .iter()
            .filter(|(_, room)| room.has_member(member_id))
            .map(|(room_id, room)| StoredRoom {
                room_id: room_id.clone(),
                room: room.clone(),
            })
            .collect();
        joined.sort_by(|a, b| b.room.updated_at().cmp(a.room.updated_at()));
        Ok(joined)
    }
}
