//! HTTP handlers for room endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::room::{
    CreateRoomCommand, CreateRoomHandler, RecentRoomsHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, MemberId};

use super::dto::{
    CreateRoomRequest, CreateRoomResponse, ErrorResponse, RecentRoomsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RoomHandlers {
    create_handler: Arc<CreateRoomHandler>,
    recent_handler: Arc<RecentRoomsHandler>,
}

impl RoomHandlers {
    pub fn new(
        create_handler: Arc<CreateRoomHandler>,
        recent_handler: Arc<RecentRoomsHandler>,
    ) -> Self {
        Self {
            create_handler,
            recent_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/new-room - Create a new room
pub async fn create_room(
    State(handlers): State<RoomHandlers>,
    payload: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected new-room body");
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::invalid_body())).into_response();
        }
    };

    if req.has_missing_fields() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::missing_fields())).into_response();
    }

    let cmd = CreateRoomCommand {
        room_name: req.room_name,
        hosting_id: req.hosting_id,
        desk_config: req.desk_config,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response = CreateRoomResponse {
                room_id: result.room_id.to_string(),
                created_at: *result.room.created_at(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_room_error(e),
    }
}

/// GET /api/v1/room/recent-rooms/:id - Rooms the member has joined
pub async fn recent_rooms(
    State(handlers): State<RoomHandlers>,
    Path(id): Path<String>,
) -> Response {
    let Ok(member_id) = MemberId::new(id) else {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::missing_fields())).into_response();
    };

    match handlers.recent_handler.handle(&member_id).await {
        Ok(rooms) => {
            let response = RecentRoomsResponse {
                data: rooms.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_room_error(e),
    }
}

fn handle_room_error(error: DomainError) -> Response {
    match error.code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::missing_fields())).into_response()
        }
        _ => {
            tracing::error!(error = %error, "Room request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(error.message)),
            )
                .into_response()
        }
    }
}
