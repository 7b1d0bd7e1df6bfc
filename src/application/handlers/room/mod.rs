//! Room command and query handlers.

mod create_room;
mod recent_rooms;
mod room_action;

pub use create_room::{CreateRoomCommand, CreateRoomHandler, CreateRoomResult};
pub use recent_rooms::RecentRoomsHandler;
pub use room_action::{ActionKind, RoomAction, RoomActionError, RoomActionHandler};
