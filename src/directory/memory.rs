use super::table::{DirectoryTable, Insert};
use super::DirectoryStore;
use crate::error::RoomError;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory directory. Entries are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<DirectoryTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms stored
    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl DirectoryStore for MemoryStore {
    async fn get(&self, room: &str) -> Result<Option<String>, RoomError> {
        let table = self.table.read().await;
        Ok(table.get(room).map(str::to_string))
    }

    async fn put(&self, room: &str, session_id: &str) -> Result<String, RoomError> {
        let mut table = self.table.write().await;

        match table.insert(room.to_string(), session_id.to_string()) {
            Insert::Added => {
                debug!("Stored session {} for room {}", session_id, room);
                Ok(session_id.to_string())
            }
            Insert::Existing(existing) => Ok(existing),
        }
    }

    async fn find_room_by_session(&self, session_id: &str) -> Result<Option<String>, RoomError> {
        let table = self.table.read().await;
        Ok(table.find_room(session_id).map(str::to_string))
    }
}
