use crate::directory::DirectoryStore;
use crate::error::RoomError;
use crate::platform::{MediaMode, SessionCreator};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Session id for a room, and whether this call created it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSession {
    pub session_id: String,
    pub is_new: bool,
}

/// Maps room names onto platform sessions, creating sessions on first use
pub struct SessionProvisioner {
    store: Arc<dyn DirectoryStore>,
    creator: Arc<dyn SessionCreator>,
    media_mode: MediaMode,
}

impl SessionProvisioner {
    pub fn new(store: Arc<dyn DirectoryStore>, creator: Arc<dyn SessionCreator>) -> Self {
        Self {
            store,
            creator,
            media_mode: MediaMode::Routed,
        }
    }

    /// Return the session for `room`, creating one if the room is new.
    ///
    /// Concurrent first resolutions of the same room may each create a
    /// platform session. Only the first one stored is kept; the others are
    /// orphaned on the platform and every caller gets the stored id.
    pub async fn resolve_session(&self, room: &str) -> Result<ResolvedSession, RoomError> {
        if room.is_empty() {
            return Err(RoomError::invalid("room name must not be empty"));
        }

        if let Some(session_id) = self.store.get(room).await? {
            return Ok(ResolvedSession {
                session_id,
                is_new: false,
            });
        }

        info!("Creating a session for room: {}", room);

        let created = self
            .creator
            .create_session(self.media_mode)
            .await
            .map_err(RoomError::SessionCreationFailed)?;

        let retained = self.store.put(room, &created).await?;
        if retained != created {
            warn!(
                "Room {} was claimed concurrently; discarding session {} in favor of {}",
                room, created, retained
            );
            return Ok(ResolvedSession {
                session_id: retained,
                is_new: false,
            });
        }

        info!("Room {} is now session {}", room, created);

        Ok(ResolvedSession {
            session_id: created,
            is_new: true,
        })
    }
}
