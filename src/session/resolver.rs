use crate::directory::DirectoryStore;
use crate::error::RoomError;
use std::sync::Arc;

/// Reverse lookup from session id to room name.
///
/// Used to label archives and renders; a missing room is not an error.
#[derive(Clone)]
pub struct RoomResolver {
    store: Arc<dyn DirectoryStore>,
}

impl RoomResolver {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    pub async fn room_for_session(&self, session_id: &str) -> Result<Option<String>, RoomError> {
        if session_id.is_empty() {
            return Err(RoomError::invalid("session id must not be empty"));
        }

        self.store.find_room_by_session(session_id).await
    }
}
