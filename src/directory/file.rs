use super::table::{DirectoryTable, Insert};
use super::{DirectoryStore, RoomSessionEntry};
use crate::error::RoomError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Directory persisted as a JSON array of `{roomName, sessionId}` entries.
///
/// The whole file is rewritten on every insert while the write lock is held,
/// so the file always matches the in-memory table. A failed write rolls the
/// insert back.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    table: RwLock<DirectoryTable>,
}

impl FileStore {
    /// Open the directory at `path`. A missing file is an empty directory.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RoomError> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice::<Vec<RoomSessionEntry>>(&bytes).map_err(|e| {
                RoomError::store(format!("parsing {}", path.display()), e.into())
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(RoomError::store(format!("reading {}", path.display()), e)),
        };

        let table = DirectoryTable::from_entries(entries);
        info!(
            "Opened room directory at {} ({} rooms)",
            path.display(),
            table.len()
        );

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &[RoomSessionEntry]) -> Result<(), RoomError> {
        let context = |action: &str| format!("{} {}", action, self.path.display());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RoomError::store(context("creating directory for"), e))?;
        }

        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| RoomError::store(context("serializing"), e.into()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RoomError::store(context("writing"), e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RoomError::store(context("replacing"), e))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl DirectoryStore for FileStore {
    async fn get(&self, room: &str) -> Result<Option<String>, RoomError> {
        let table = self.table.read().await;
        Ok(table.get(room).map(str::to_string))
    }

    async fn put(&self, room: &str, session_id: &str) -> Result<String, RoomError> {
        let mut table = self.table.write().await;

        if let Insert::Existing(existing) = table.insert(room.to_string(), session_id.to_string())
        {
            return Ok(existing);
        }

        if let Err(e) = self.persist(table.entries()).await {
            error!("Failed to persist room {}: {}", room, e);
            table.pop();
            return Err(e);
        }

        debug!("Stored session {} for room {}", session_id, room);
        Ok(session_id.to_string())
    }

    async fn find_room_by_session(&self, session_id: &str) -> Result<Option<String>, RoomError> {
        let table = self.table.read().await;
        Ok(table.find_room(session_id).map(str::to_string))
    }
}
