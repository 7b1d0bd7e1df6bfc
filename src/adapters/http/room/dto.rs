//! HTTP DTOs for room endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::room::Room;
use crate::ports::StoredRoom;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new room.
///
/// Absent fields deserialize as empty and are rejected by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub hosting_id: String,
    #[serde(default)]
    pub desk_config: String,
}

impl CreateRoomRequest {
    pub fn has_missing_fields(&self) -> bool {
        self.room_name.is_empty() || self.hosting_id.is_empty() || self.desk_config.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub created_at: Timestamp,
}

/// One entry of the recent-rooms listing: the room document plus its id.
#[derive(Debug, Clone, Serialize)]
pub struct RecentRoomView {
    pub id: String,
    #[serde(flatten)]
    pub room: Room,
}

impl From<StoredRoom> for RecentRoomView {
    fn from(stored: StoredRoom) -> Self {
        Self {
            id: stored.room_id.to_string(),
            room: stored.room,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentRoomsResponse {
    pub data: Vec<RecentRoomView>,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn invalid_body() -> Self {
        Self::new("Invalid request body")
    }

    pub fn missing_fields() -> Self {
        Self::new("Missing required fields")
    }
}
