//! Per-connection room session.
//!
//! Drives one connection through its lifecycle:
//!
//! ```text
//! CONNECTING ──(room exists, snapshot sent)──▶ ACTIVE ──(close / read error)──▶ CLOSED
//!     │                                                                            ▲
//!     └──────────────────(room missing: "Room not found")──────────────────────────┘
//! ```
//!
//! The session is transport-agnostic: it reads text frames from any stream
//! and writes through the connection's outbound queue. The axum handler
//! adapts a real socket to this shape.

use std::sync::Arc;

use futures::{Stream, StreamExt};

use crate::application::handlers::room::{RoomAction, RoomActionHandler};
use crate::domain::foundation::{MemberId, RoomId};
use crate::ports::RoomStore;

use super::hub::BroadcastHub;
use super::messages::{decode_client_frame, DecodeError, ErrorToken, ServerMessage};
use super::registry::{ConnectionId, ConnectionRegistry, OutboundSender};

/// A failed read on the underlying transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Receive failed: {0}")]
    Receive(String),
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The room did not exist (or could not be loaded) at connect time.
    RoomNotFound,
    /// The client closed the connection.
    ClientClosed,
    /// Reading from the transport failed.
    Transport(TransportError),
    /// The connection's writer went away.
    OutboundClosed,
}

/// Shared dependencies of every room session.
pub struct RoomSession {
    registry: Arc<ConnectionRegistry>,
    hub: Arc<BroadcastHub>,
    store: Arc<dyn RoomStore>,
    actions: Arc<RoomActionHandler>,
}

/// Outcome of handling one inbound frame.
enum Step {
    Continue,
    Stop(SessionEnd),
}

impl RoomSession {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        hub: Arc<BroadcastHub>,
        store: Arc<dyn RoomStore>,
        actions: Arc<RoomActionHandler>,
    ) -> Self {
        Self {
            registry,
            hub,
            store,
            actions,
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Run a connection until it closes.
    ///
    /// `outbound` is consumed: once this returns, the only remaining handle
    /// on the queue is the writer's receiver, which then drains and stops.
    pub async fn run<S>(
        &self,
        room_id: RoomId,
        member_id: MemberId,
        outbound: OutboundSender,
        mut inbound: S,
    ) -> SessionEnd
    where
        S: Stream<Item = Result<String, TransportError>> + Unpin,
    {
        let connection_id = ConnectionId::new();

        // CONNECTING
        if !self.room_exists(&room_id).await {
            tracing::info!(room_id = %room_id, member_id = %member_id, "Connection to unknown room");
            let _ = send(&outbound, &ServerMessage::error(ErrorToken::RoomNotFound)).await;
            return SessionEnd::RoomNotFound;
        }

        self.registry
            .register(connection_id, room_id.clone(), member_id.clone(), outbound.clone())
            .await;

        let end = match self.greet(&room_id, &member_id, &outbound).await {
            Step::Stop(end) => end,
            Step::Continue => {
                let room_connections = self.registry.connection_count(&room_id).await;
                tracing::info!(
                    room_id = %room_id,
                    member_id = %member_id,
                    connection_id = %connection_id,
                    room_connections,
                    "Connection active"
                );

                // ACTIVE
                loop {
                    match inbound.next().await {
                        None => break SessionEnd::ClientClosed,
                        Some(Err(e)) => break SessionEnd::Transport(e),
                        Some(Ok(text)) => {
                            if let Step::Stop(end) =
                                self.on_frame(&room_id, &member_id, &outbound, &text).await
                            {
                                break end;
                            }
                        }
                    }
                }
            }
        };

        // CLOSED
        self.registry.deregister(&connection_id).await;
        let room_connections = self.registry.connection_count(&room_id).await;
        tracing::info!(
            room_id = %room_id,
            member_id = %member_id,
            connection_id = %connection_id,
            reason = ?end,
            room_connections,
            "Connection closed"
        );
        end
    }

    async fn room_exists(&self, room_id: &RoomId) -> bool {
        match self.store.exists(room_id).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::error!(room_id = %room_id, error = %e, "Existence check failed");
                false
            }
        }
    }

    /// Push the current snapshot, plus a join prompt for non-members.
    async fn greet(&self, room_id: &RoomId, member_id: &MemberId, outbound: &OutboundSender) -> Step {
        let room = match self.store.get(room_id).await {
            Ok(room) => room,
            Err(e) => {
                tracing::warn!(room_id = %room_id, error = %e, "Snapshot fetch failed on connect");
                let _ = send(outbound, &ServerMessage::error(ErrorToken::RoomNotFound)).await;
                return Step::Stop(SessionEnd::RoomNotFound);
            }
        };

        if send(outbound, &ServerMessage::update_room(&room)).await.is_err() {
            return Step::Stop(SessionEnd::OutboundClosed);
        }
        if !room.has_member(member_id)
            && send(outbound, &ServerMessage::need_to_join()).await.is_err()
        {
            return Step::Stop(SessionEnd::OutboundClosed);
        }
        Step::Continue
    }

    async fn on_frame(
        &self,
        room_id: &RoomId,
        member_id: &MemberId,
        outbound: &OutboundSender,
        text: &str,
    ) -> Step {
        let action = match decode_client_frame(text) {
            Ok(action) => action,
            Err(DecodeError::UnknownAction(name)) => {
                tracing::debug!(room_id = %room_id, member_id = %member_id, action = %name, "Ignoring unknown action");
                return Step::Continue;
            }
            Err(e) => {
                tracing::debug!(room_id = %room_id, member_id = %member_id, error = %e, "Rejected frame");
                return self.reply(outbound, ErrorToken::InvalidPayload).await;
            }
        };

        self.apply(room_id, member_id, outbound, action).await
    }

    async fn apply(
        &self,
        room_id: &RoomId,
        member_id: &MemberId,
        outbound: &OutboundSender,
        action: RoomAction,
    ) -> Step {
        let kind = action.kind();
        match self.actions.handle(room_id, member_id, action).await {
            Ok(room) => {
                self.hub
                    .publish(room_id, &ServerMessage::update_room(&room))
                    .await;
                Step::Continue
            }
            Err(e) => {
                let token = ErrorToken::for_failure(kind, &e);
                tracing::warn!(
                    room_id = %room_id,
                    member_id = %member_id,
                    action = %kind,
                    error = %e,
                    "Action failed"
                );
                self.reply(outbound, token).await
            }
        }
    }

    async fn reply(&self, outbound: &OutboundSender, token: ErrorToken) -> Step {
        match send(outbound, &ServerMessage::error(token)).await {
            Ok(()) => Step::Continue,
            Err(()) => Step::Stop(SessionEnd::OutboundClosed),
        }
    }
}

/// Enqueue a frame for this connection only.
///
/// Waits for queue space: only this connection's own writer can be slow here.
async fn send(outbound: &OutboundSender, message: &ServerMessage<'_>) -> Result<(), ()> {
    let frame = message.encode().map_err(|e| {
        tracing::error!(error = %e, "Failed to encode frame");
    })?;
    outbound.send(frame).await.map_err(|_| ())
}
