//! Redis-backed room store for production deployments.
//!
//! Each room is one JSON document stored as a string under
//! `{prefix}room:{room_id}`. Partial updates read the document, overlay the
//! patch and write it back.
//!
//! Every write also adds the room id to `{prefix}member:{member_id}:rooms`
//! for each seated member. Members are never unseated, so the index only
//! grows; ids whose document has gone are skipped when listing.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::config::RedisConfig;
use crate::domain::foundation::{MemberId, RoomId};
use crate::domain::room::{Room, RoomPatch};
use crate::ports::{RoomStore, RoomStoreError, StoredRoom};

/// Redis document store for rooms.
#[derive(Clone)]
pub struct RedisRoomStore {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisRoomStore {
    /// Create a store over an existing connection.
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Open a multiplexed connection using the Redis configuration.
    pub async fn connect(config: &RedisConfig) -> Result<Self, RoomStoreError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| RoomStoreError::Unavailable(e.to_string()))?;
        let conn = tokio::time::timeout(
            config.timeout(),
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| RoomStoreError::Unavailable("timed out connecting to redis".to_string()))?
        .map_err(|e| RoomStoreError::Unavailable(e.to_string()))?;

        Ok(Self::new(conn, config.key_prefix.clone()))
    }

    fn key(&self, room_id: &RoomId) -> String {
        room_key(&self.key_prefix, room_id)
    }

    async fn read(&self, room_id: &RoomId) -> Result<Room, RoomStoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(self.key(room_id))
            .await
            .map_err(|e: redis::RedisError| RoomStoreError::Unavailable(e.to_string()))?;

        let raw = raw.ok_or_else(|| RoomStoreError::NotFound(room_id.clone()))?;
        decode_room(room_id, &raw)
    }

    async fn write(&self, room_id: &RoomId, room: &Room) -> Result<(), RoomStoreError> {
        let json = serde_json::to_string(room).map_err(|e| RoomStoreError::Corrupt {
            room_id: room_id.clone(),
            reason: e.to_string(),
        })?;

        let mut pipe = redis::pipe();
        pipe.atomic().set(self.key(room_id), json).ignore();
        for member in room.members() {
            pipe.sadd(member_rooms_key(&self.key_prefix, member.id()), room_id.as_str())
                .ignore();
        }

        let mut conn = self.conn.clone();
        pipe.query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| RoomStoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl RoomStore for RedisRoomStore {
    async fn exists(&self, room_id: &RoomId) -> Result<bool, RoomStoreError> {
        let mut conn = self.conn.clone();
        conn.exists(self.key(room_id))
            .await
            .map_err(|e: redis::RedisError| RoomStoreError::Unavailable(e.to_string()))
    }

    async fn get(&self, room_id: &RoomId) -> Result<Room, RoomStoreError> {
        self.read(room_id).await
    }

    async fn set(&self, room_id: &RoomId, room: &Room) -> Result<(), RoomStoreError> {
        self.write(room_id, room).await
    }

    async fn update_fields(
        &self,
        room_id: &RoomId,
        patch: RoomPatch,
    ) -> Result<(), RoomStoreError> {
        let mut room = self.read(room_id).await?;
        room.apply_patch(patch);
        self.write(room_id, &room).await
    }

    async fn recent_rooms(&self, member_id: &MemberId) -> Result<Vec<StoredRoom>, RoomStoreError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn
            .smembers(member_rooms_key(&self.key_prefix, member_id))
            .await
            .map_err(|e: redis::RedisError| RoomStoreError::Unavailable(e.to_string()))?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids
            .iter()
            .map(|id| format!("{}room:{}", self.key_prefix, id))
            .collect();
        let raws: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(|e| RoomStoreError::Unavailable(e.to_string()))?;

        Ok(collect_recent(member_id, ids.into_iter().zip(raws)))
    }
}

fn room_key(prefix: &str, room_id: &RoomId) -> String {
    format!("{}room:{}", prefix, room_id)
}

fn member_rooms_key(prefix: &str, member_id: &MemberId) -> String {
    format!("{}member:{}:rooms", prefix, member_id)
}

/// Decode indexed documents, dropping vanished or unreadable ones, newest first.
fn collect_recent(
    member_id: &MemberId,
    entries: impl IntoIterator<Item = (String, Option<String>)>,
) -> Vec<StoredRoom> {
    let mut rooms: Vec<StoredRoom> = entries
        .into_iter()
        .filter_map(|(id, raw)| {
            let room_id = RoomId::new(id).ok()?;
            match decode_room(&room_id, &raw?) {
                Ok(room) if room.has_member(member_id) => Some(StoredRoom { room_id, room }),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(room_id = %room_id, error = %e, "Skipping unreadable room");
                    None
                }
            }
        })
        .collect();
    rooms.sort_by(|a, b| b.room.updated_at().cmp(a.room.updated_at()));
    rooms
}

fn decode_room(room_id: &RoomId, raw: &str) -> Result<Room, RoomStoreError> {
    serde_json::from_str(raw).map_err(|e| RoomStoreError::Corrupt {
        room_id: room_id.clone(),
        reason: e.to_string(),
    })
}
