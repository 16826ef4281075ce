use super::RoomSessionEntry;
use std::collections::HashMap;

/// Insertion-ordered table shared by the store backings.
#[derive(Debug, Default)]
pub(crate) struct DirectoryTable {
    entries: Vec<RoomSessionEntry>,
    by_room: HashMap<String, usize>,
}

/// Outcome of an insert attempt
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Insert {
    Added,
    Existing(String),
}

impl DirectoryTable {
    /// Build from persisted entries. A repeated room keeps its first session id.
    pub(crate) fn from_entries(entries: Vec<RoomSessionEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            table.insert(entry.room_name, entry.session_id);
        }
        table
    }

    pub(crate) fn get(&self, room: &str) -> Option<&str> {
        self.by_room
            .get(room)
            .and_then(|&i| self.entries.get(i))
            .map(|entry| entry.session_id.as_str())
    }

    pub(crate) fn insert(&mut self, room: String, session_id: String) -> Insert {
        if let Some(existing) = self.get(&room) {
            return Insert::Existing(existing.to_string());
        }

        self.by_room.insert(room.clone(), self.entries.len());
        self.entries.push(RoomSessionEntry {
            room_name: room,
            session_id,
        });
        Insert::Added
    }

    /// Undo the most recent `Insert::Added`
    pub(crate) fn pop(&mut self) {
        if let Some(entry) = self.entries.pop() {
            self.by_room.remove(&entry.room_name);
        }
    }

    pub(crate) fn find_room(&self, session_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.session_id == session_id)
            .map(|entry| entry.room_name.as_str())
    }

    pub(crate) fn entries(&self) -> &[RoomSessionEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
