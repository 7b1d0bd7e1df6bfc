//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RoomStore` - Room document persistence (get/set/partial update, recent rooms)
//! - `ProfileResolver` - Profile token resolution for authenticated joins

mod profile_resolver;
mod room_store;

pub use profile_resolver::{ProfileError, ProfileResolver};
pub use room_store::{RoomStore, RoomStoreError, StoredRoom};
