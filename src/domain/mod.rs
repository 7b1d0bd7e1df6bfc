//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, profiles)
//! - `room` - Room aggregate and its voting-round state machine

pub mod foundation;
pub mod room;
