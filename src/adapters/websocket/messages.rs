//! WebSocket message types for room sessions.
//!
//! Defines the protocol between server and connected clients:
//! - Client → Server: `{ "action": ..., "payload": ... }` envelopes
//! - Server → Client: room snapshots, join prompts, error tokens

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::handlers::room::{ActionKind, RoomAction, RoomActionError};
use crate::domain::room::{Room, RoomError};

// ============================================
// Client → Server Messages
// ============================================

/// Why an inbound frame could not be turned into a `RoomAction`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Well-formed envelope naming an action this server does not know.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Known action whose payload has the wrong shape.
    #[error("Invalid payload for {action}: {reason}")]
    InvalidPayload { action: ActionKind, reason: String },

    /// Not JSON, or no string `action` field.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),
}

#[derive(Debug, Deserialize)]
struct ClientEnvelope {
    action: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JoinRoomPayload {
    name: String,
    #[serde(default)]
    profile_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateEstimatePayload {
    value: String,
}

/// Decode one inbound text frame.
///
/// Pure: no I/O, same input always yields the same output.
pub fn decode_client_frame(text: &str) -> Result<RoomAction, DecodeError> {
    let envelope: ClientEnvelope = serde_json::from_str(text)
        .map_err(|e| DecodeError::MalformedEnvelope(e.to_string()))?;

    match envelope.action.as_str() {
        "JOIN_ROOM" => {
            let payload: JoinRoomPayload = payload_for(ActionKind::JoinRoom, envelope.payload)?;
            Ok(RoomAction::JoinRoom {
                name: payload.name,
                profile_token: payload.profile_token,
            })
        }
        "UPDATE_ESTIMATED_VALUE" => {
            let payload: UpdateEstimatePayload =
                payload_for(ActionKind::UpdateEstimatedValue, envelope.payload)?;
            Ok(RoomAction::UpdateEstimate {
                value: payload.value,
            })
        }
        "REVEAL_CARDS" => Ok(RoomAction::RevealCards),
        "RESET_ROOM" => Ok(RoomAction::ResetRoom),
        "UPDATE_ACTIVE_USER" => Ok(RoomAction::UpdateActiveUser),
        _ => Err(DecodeError::UnknownAction(envelope.action)),
    }
}

fn payload_for<T: serde::de::DeserializeOwned>(
    action: ActionKind,
    payload: serde_json::Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|e| DecodeError::InvalidPayload {
        action,
        reason: e.to_string(),
    })
}

// ============================================
// Server → Client Messages
// ============================================

/// Action frames pushed to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerAction<'a> {
    /// Full room snapshot.
    UpdateRoom(&'a Room),
    /// The caller is not seated and should send `JOIN_ROOM`.
    NeedToJoin,
}

/// Error tokens sent to the originating connection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorToken {
    #[serde(rename = "JOIN_ROOM_FAILED")]
    JoinRoomFailed,
    #[serde(rename = "NOT_FOUND_USER")]
    NotFoundUser,
    #[serde(rename = "UPDATE_ESTIMATED_VALUE_FAILED")]
    UpdateEstimatedValueFailed,
    #[serde(rename = "REVEAL_CARDS_FAILED")]
    RevealCardsFailed,
    #[serde(rename = "RESET_ROOM_FAILED")]
    ResetRoomFailed,
    #[serde(rename = "INVALID_PAYLOAD")]
    InvalidPayload,
    #[serde(rename = "Room not found")]
    RoomNotFound,
}

impl ErrorToken {
    /// Token reported when `kind` failed with `err`.
    pub fn for_failure(kind: ActionKind, err: &RoomActionError) -> Self {
        match err {
            RoomActionError::Domain(RoomError::MemberNotFound(_)) => ErrorToken::NotFoundUser,
            RoomActionError::Domain(RoomError::AlreadyMember(_)) => ErrorToken::JoinRoomFailed,
            RoomActionError::Profile(_) => ErrorToken::JoinRoomFailed,
            RoomActionError::Storage(_) => match kind {
                ActionKind::JoinRoom => ErrorToken::JoinRoomFailed,
                ActionKind::UpdateEstimatedValue => ErrorToken::UpdateEstimatedValueFailed,
                ActionKind::RevealCards => ErrorToken::RevealCardsFailed,
                ActionKind::ResetRoom => ErrorToken::ResetRoomFailed,
                ActionKind::UpdateActiveUser => ErrorToken::NotFoundUser,
            },
        }
    }
}

/// Every frame the server sends.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerMessage<'a> {
    Action(ServerAction<'a>),
    Error { error: ErrorToken },
}

impl<'a> ServerMessage<'a> {
    pub fn update_room(room: &'a Room) -> Self {
        ServerMessage::Action(ServerAction::UpdateRoom(room))
    }

    pub fn need_to_join() -> Self {
        ServerMessage::Action(ServerAction::NeedToJoin)
    }

    pub fn error(token: ErrorToken) -> Self {
        ServerMessage::Error { error: token }
    }

    /// Serialize to a shareable text frame.
    pub fn encode(&self) -> Result<Arc<str>, serde_json::Error> {
        serde_json::to_string(self).map(Arc::from)
    }
}
