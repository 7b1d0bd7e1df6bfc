//! WebSocket upgrade handler for room connections.
//!
//! Handles the HTTP → WebSocket upgrade and wires the socket to a
//! `RoomSession`:
//! 1. Parse caller and room ids from the path
//! 2. Upgrade to WebSocket
//! 3. Spawn a writer task draining the outbound queue into the socket
//! 4. Run the session over the socket's inbound text frames
//! 5. Let the writer flush and close once the session is done

use std::future;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::domain::foundation::{MemberId, RoomId};

use super::registry::ConnectionRegistry;
use super::session::{RoomSession, TransportError};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    session: Arc<RoomSession>,
    /// Capacity of each connection's outbound queue.
    outbound_buffer: usize,
}

impl WebSocketState {
    pub fn new(session: Arc<RoomSession>, outbound_buffer: usize) -> Self {
        Self {
            session,
            outbound_buffer: outbound_buffer.max(1),
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        self.session.registry()
    }
}

/// Handle WebSocket upgrade requests for a room.
///
/// Route: `GET /ws/room/:uid/:id`, where `uid` is the caller's member id
/// and `id` the room id.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((uid, id)): Path<(String, String)>,
    State(state): State<WebSocketState>,
) -> Response {
    let (member_id, room_id) = match (MemberId::new(uid), RoomId::new(id)) {
        (Ok(member_id), Ok(room_id)) => (member_id, room_id),
        _ => return (StatusCode::BAD_REQUEST, "Invalid user or room id").into_response(),
    };

    ws.on_upgrade(move |socket| handle_socket(socket, room_id, member_id, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket(socket: WebSocket, room_id: RoomId, member_id: MemberId, state: WebSocketState) {
    let (mut sink, stream) = socket.split();
    let (outbound, mut queue) = mpsc::channel::<Arc<str>>(state.outbound_buffer);

    // Writer: drains the queue until every sender is gone
    let writer_room = room_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(frame) = queue.recv().await {
            if let Err(e) = sink.send(Message::Text(frame.to_string())).await {
                tracing::debug!(room_id = %writer_room, error = %e, "Send error, stopping writer");
                return;
            }
        }
        let _ = sink.close().await;
    });

    let inbound = stream
        .take_while(|msg| future::ready(!matches!(msg, Ok(Message::Close(_)))))
        .filter_map(|msg| future::ready(inbound_frame(msg)));

    state
        .session
        .run(room_id, member_id, outbound, Box::pin(inbound))
        .await;

    if let Err(e) = writer.await {
        tracing::error!(error = %e, "Writer task panicked");
    }
}

/// Map a raw socket message to the text the session decodes.
///
/// Binary frames are read as UTF-8 JSON too; invalid bytes become U+FFFD and
/// the frame is then rejected by the decoder like any other bad payload.
fn inbound_frame(msg: Result<Message, axum::Error>) -> Option<Result<String, TransportError>> {
    match msg {
        Ok(Message::Text(text)) => Some(Ok(text)),
        Ok(Message::Binary(bytes)) => Some(Ok(String::from_utf8_lossy(&bytes).into_owned())),
        // Ping/pong are answered by the protocol layer
        Ok(_) => None,
        Err(e) => Some(Err(TransportError::Receive(e.to_string()))),
    }
}

/// Create axum router for the room WebSocket endpoint.
pub fn websocket_router(state: WebSocketState) -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route("/ws/room/:uid/:id", get(ws_handler))
        .with_state(state)
}
