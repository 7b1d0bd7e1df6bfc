//! RecentRoomsHandler - Query handler for the rooms a member has joined.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::ports::{RoomStore, StoredRoom};

/// Handler for listing a member's recent rooms.
pub struct RecentRoomsHandler {
    store: Arc<dyn RoomStore>,
}

impl RecentRoomsHandler {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    /// Rooms the member is seated in, most recently updated first.
    pub async fn handle(&self, member_id: &MemberId) -> Result<Vec<StoredRoom>, DomainError> {
        let rooms = self.store.recent_rooms(member_id).await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, e.to_string())
                .with_detail("member_id", member_id.to_string())
        })?;

        tracing::debug!(member_id = %member_id, count = rooms.len(), "Listed recent rooms");
        Ok(rooms)
    }
}
