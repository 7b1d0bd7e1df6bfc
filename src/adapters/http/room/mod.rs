//! HTTP adapter for room creation and the recent-rooms listing.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateRoomRequest, CreateRoomResponse, ErrorResponse, RecentRoomView, RecentRoomsResponse,
};
pub use handlers::{create_room, recent_rooms, RoomHandlers};
pub use routes::room_routes;
