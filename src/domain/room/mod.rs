//! Room domain module.
//!
//! The room state machine: seating members, recording estimates, revealing
//! and resetting rounds. Everything here is pure; persistence and fan-out
//! live in the application and adapter layers.
//!
//! # Transitions
//!
//! - `join` - seat a member (`AlreadyMember` if seated)
//! - `update_estimate` - record a card, rebuild the result
//! - `reveal` - flip to `REVEALED`, rebuild the result
//! - `reset` - clear every card and the result, back to `VOTING`
//! - `touch` - refresh a member's activity timestamp

mod aggregate;
mod errors;
mod member;
mod patch;
mod status;

pub use aggregate::{tally, Room};
pub use errors::RoomError;
pub use member::Member;
pub use patch::RoomPatch;
pub use status::RoomStatus;
