//! CreateRoomHandler - Command handler for opening a new room.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, RoomId, Timestamp};
use crate::domain::room::Room;
use crate::ports::RoomStore;

/// Command to create a room.
#[derive(Debug, Clone)]
pub struct CreateRoomCommand {
    pub room_name: String,
    pub hosting_id: String,
    pub desk_config: String,
}

/// Result of successful room creation.
#[derive(Debug, Clone)]
pub struct CreateRoomResult {
    pub room_id: RoomId,
    pub room: Room,
}

/// Handler for creating rooms.
pub struct CreateRoomHandler {
    store: Arc<dyn RoomStore>,
}

impl CreateRoomHandler {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateRoomCommand) -> Result<CreateRoomResult, DomainError> {
        // 1. Validate
        if cmd.hosting_id.trim().is_empty() {
            return Err(DomainError::validation("hosting_id", "Missing required fields"));
        }
        let room = Room::new(cmd.room_name, cmd.desk_config, Timestamp::now())?;

        // 2. Persist under a fresh id
        let room_id = RoomId::generate();
        self.store.set(&room_id, &room).await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, e.to_string())
                .with_detail("room_id", room_id.to_string())
        })?;

        tracing::info!(
            room_id = %room_id,
            hosting_id = %cmd.hosting_id,
            desk_config = %room.desk_config(),
            "Room created"
        );

        Ok(CreateRoomResult { room_id, room })
    }
}
