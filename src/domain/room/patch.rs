//! Partial room writes.
//!
//! Each action persists only the fields it touched. A patch is built from
//! the post-transition snapshot so the stored document and the broadcast
//! snapshot agree on every patched field.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::{Member, Room, RoomStatus};

/// Subset of room fields written by `RoomStore::update_fields`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<BTreeMap<String, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl RoomPatch {
    /// Membership change: join and activity refresh.
    pub fn members_of(room: &Room) -> Self {
        Self {
            members: Some(room.members().to_vec()),
            updated_at: Some(*room.updated_at()),
            ..Default::default()
        }
    }

    /// Estimate change: members plus the recomputed result.
    pub fn estimates_of(room: &Room) -> Self {
        Self {
            result: Some(room.result().clone()),
            ..Self::members_of(room)
        }
    }

    /// Round change (reveal or reset): estimates plus status, in one write.
    pub fn round_of(room: &Room) -> Self {
        Self {
            status: Some(room.status()),
            ..Self::estimates_of(room)
        }
    }
}
