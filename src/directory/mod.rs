//! Room directory: the room name → session id mapping
//!
//! The directory is append-only. An entry is written once, on the first
//! resolution of a room, and never overwritten. The reverse lookup is a
//! scan over the same table so the two directions cannot drift.
//!
//! Backings:
//! - `MemoryStore` - process lifetime only
//! - `FileStore` - JSON file, survives restarts

mod file;
mod memory;
mod table;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::RoomError;
use serde::{Deserialize, Serialize};

/// A single room → session association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSessionEntry {
    pub room_name: String,
    pub session_id: String,
}

/// Storage contract shared by every directory backing
#[async_trait::async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Session id stored for `room`, if any
    async fn get(&self, room: &str) -> Result<Option<String>, RoomError>;

    /// Store `session_id` for `room` unless the room already has one.
    ///
    /// Returns the id that is retained afterwards, which is the existing one
    /// when the room was already present. Callers must use the returned id
    /// rather than assume their write took effect.
    async fn put(&self, room: &str, session_id: &str) -> Result<String, RoomError>;

    /// First room (in insertion order) whose session id matches
    async fn find_room_by_session(&self, session_id: &str) -> Result<Option<String>, RoomError>;
}
