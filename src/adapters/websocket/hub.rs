//! Broadcast hub - room-wide fan-out over the connection registry.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;

use crate::domain::foundation::RoomId;

use super::messages::ServerMessage;
use super::registry::ConnectionRegistry;

/// Delivers frames to every connection bound to a room.
///
/// Delivery never waits on a recipient: a full or closed outbound queue
/// counts as a failed delivery for that recipient only.
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastHub {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Serialize `message` once and enqueue it for the whole room.
    ///
    /// Returns the number of connections the frame was enqueued for.
    pub async fn publish(&self, room_id: &RoomId, message: &ServerMessage<'_>) -> usize {
        match message.encode() {
            Ok(frame) => self.publish_frame(room_id, frame).await,
            Err(e) => {
                tracing::error!(room_id = %room_id, error = %e, "Failed to encode broadcast");
                0
            }
        }
    }

    /// Enqueue an already-encoded frame for the whole room.
    pub async fn publish_frame(&self, room_id: &RoomId, frame: Arc<str>) -> usize {
        let mut delivered = 0;
        self.registry
            .for_each_in_room(room_id, |connection_id, member_id, sender| {
                match sender.try_send(frame.clone()) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => tracing::warn!(
                        room_id = %room_id,
                        connection_id = %connection_id,
                        member_id = %member_id,
                        "Skipping broadcast to slow client"
                    ),
                    Err(TrySendError::Closed(_)) => tracing::debug!(
                        room_id = %room_id,
                        connection_id = %connection_id,
                        "Skipping broadcast to closed connection"
                    ),
                }
            })
            .await;

        tracing::debug!(room_id = %room_id, delivered, "Broadcast published");
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::messages::ErrorToken;
    use crate::adapters::websocket::registry::{ConnectionId, OutboundSender};
    use crate::domain::foundation::MemberId;
    use tokio::sync::mpsc;

    fn room(id: &str) -> RoomId {
        RoomId::new(id).unwrap()
    }

    async fn connect(
        registry: &ConnectionRegistry,
        room_id: &str,
        capacity: usize,
    ) -> mpsc::Receiver<Arc<str>> {
        let (tx, rx): (OutboundSender, _) = mpsc::channel(capacity);
        registry
            .register(
                ConnectionId::new(),
                room(room_id),
                MemberId::new("u").unwrap(),
                tx,
            )
            .await;
        rx
    }

    fn frame() -> ServerMessage<'static> {
        ServerMessage::need_to_join()
    }

    #[tokio::test]
    async fn publish_reaches_every_connection_in_room() {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = BroadcastHub::new(registry.clone());
        let mut rx1 = connect(&registry, "r1", 4).await;
        let mut rx2 = connect(&registry, "r1", 4).await;

        let delivered = hub.publish(&room("r1"), &frame()).await;

        assert_eq!(delivered, 2);
        assert_eq!(&*rx1.recv().await.unwrap(), r#"{"action":"NEED_TO_JOIN"}"#);
        assert_eq!(&*rx2.recv().await.unwrap(), r#"{"action":"NEED_TO_JOIN"}"#);
    }

    #[tokio::test]
    async fn publish_is_scoped_to_room() {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = BroadcastHub::new(registry.clone());
        let mut inside = connect(&registry, "r1", 4).await;
        let mut outside = connect(&registry, "r2", 4).await;

        hub.publish(&room("r1"), &frame()).await;

        assert!(inside.try_recv().is_ok());
        assert!(outside.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_room_delivers_nothing() {
        let hub = BroadcastHub::new(Arc::new(ConnectionRegistry::new()));
        assert_eq!(hub.publish(&room("r1"), &frame()).await, 0);
    }

    #[tokio::test]
    async fn full_queue_is_skipped_without_blocking() {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = BroadcastHub::new(registry.clone());
        let mut slow = connect(&registry, "r1", 1).await;
        let mut fast = connect(&registry, "r1", 4).await;

        assert_eq!(hub.publish(&room("r1"), &frame()).await, 2);
        let second = ServerMessage::error(ErrorToken::InvalidPayload);
        assert_eq!(hub.publish(&room("r1"), &second).await, 1);

        assert!(slow.recv().await.is_some());
        assert!(slow.try_recv().is_err());
        assert!(fast.recv().await.is_some());
        assert!(fast.recv().await.is_some());
    }

    #[tokio::test]
    async fn closed_queue_is_skipped() {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = BroadcastHub::new(registry.clone());
        let gone = connect(&registry, "r1", 4).await;
        let mut alive = connect(&registry, "r1", 4).await;
        drop(gone);

        assert_eq!(hub.publish(&room("r1"), &frame()).await, 1);
        assert!(alive.recv().await.is_some());
    }
}
