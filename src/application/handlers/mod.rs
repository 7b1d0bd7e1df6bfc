//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod guest;
pub mod room;

pub use guest::SignInGuestHandler;
pub use room::{
    ActionKind, CreateRoomCommand, CreateRoomHandler, CreateRoomResult, RecentRoomsHandler,
    RoomAction, RoomActionError, RoomActionHandler,
};
