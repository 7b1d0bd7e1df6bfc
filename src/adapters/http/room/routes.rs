//! HTTP routes for room endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_room, recent_rooms, RoomHandlers};

/// Creates the room router, mounted under `/api/v1`.
pub fn room_routes(handlers: RoomHandlers) -> Router {
    Router::new()
        .route("/new-room", post(create_room))
        .route("/room/recent-rooms/:id", get(recent_rooms))
        .with_state(handlers)
}
