//! Storage Adapters
//!
//! Implementations of the RoomStore port.
//!
//! ## Available Adapters
//!
//! - **RedisRoomStore** - Stores each room as a JSON document in Redis
//! - **InMemoryRoomStore** - Stores rooms in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryRoomStore, RedisRoomStore};
//!
//! // Production: redis-backed documents
//! let store = RedisRoomStore::connect(&config.redis).await?;
//!
//! // Testing: in-memory storage
//! let store = InMemoryRoomStore::new();
//! ```

mod in_memory_room_store;
mod redis_room_store;

pub use in_memory_room_store::InMemoryRoomStore;
pub use redis_room_store::RedisRoomStore;
