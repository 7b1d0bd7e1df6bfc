//! RoomStatus enum for the voting round lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the current estimation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoomStatus {
    /// Estimates are hidden and can be submitted.
    #[default]
    #[serde(rename = "VOTING")]
    Voting,
    /// Estimates are shown to everyone.
    #[serde(rename = "REVEALED", alias = "REVEALED_CARDS")]
    Revealed,
}

impl RoomStatus {
    /// Returns true while estimates are still hidden.
    pub fn is_voting(&self) -> bool {
        matches!(self, RoomStatus::Voting)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoomStatus::Voting => "VOTING",
            RoomStatus::Revealed => "REVEALED",
        };
        write!(f, "{}", s)
    }
}
