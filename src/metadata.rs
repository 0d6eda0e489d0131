//! Workspace metadata resolution.
//!
//! A Slack export carries two sidecar files at the archive root:
//! `users.json` (id, handle, optional real name) and `channels.json`
//! (id, name). [`MetadataIndex`] loads both once before any channel is
//! processed and resolves opaque user ids for the rest of the run.
//!
//! Resolution never fails: an unknown id yields an empty string. A single
//! deactivated or external user must not abort a whole workspace export.

use std::collections::HashMap;

use serde::Deserialize;

/// One entry from the `users.json` sidecar.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    /// Opaque user identifier, e.g. `U123456789`.
    pub id: String,

    /// Short handle, e.g. `alice`.
    pub name: String,

    /// Full display name, when the workspace has one on file.
    #[serde(default)]
    pub real_name: Option<String>,
}

/// One entry from the `channels.json` sidecar.
///
/// Channel naming is derived from directory names during the archive walk;
/// this entry only validates and augments it, so message extraction works
/// even when the sidecar is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelEntry {
    /// Opaque channel identifier.
    pub id: String,

    /// Channel name, without the leading `#`.
    pub name: String,
}

/// Read-only id → name mapping for one export run.
#[derive(Debug, Default)]
pub struct MetadataIndex {
    users: HashMap<String, UserEntry>,
    channels: HashMap<String, ChannelEntry>,
}

impl MetadataIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the user mapping.
    ///
    /// Duplicate ids overwrite earlier entries (last write wins).
    pub fn load_users(&mut self, entries: Vec<UserEntry>) {
        for entry in entries {
            self.users.insert(entry.id.clone(), entry);
        }
    }

    /// Populates the channel mapping.
    pub fn load_channels(&mut self, entries: Vec<ChannelEntry>) {
        for entry in entries {
            self.channels.insert(entry.id.clone(), entry);
        }
    }

    /// Resolves a user id to its full display name.
    ///
    /// Falls back to the short handle when no real name is on file, and to
    /// an empty string when the id is unknown.
    pub fn display_name(&self, id: &str) -> &str {
        match self.users.get(id) {
            Some(entry) => entry.real_name.as_deref().unwrap_or(&entry.name),
            None => "",
        }
    }

    /// Resolves a user id to its short handle, or an empty string when the
    /// id is unknown.
    pub fn short_handle(&self, id: &str) -> &str {
        self.users.get(id).map_or("", |entry| entry.name.as_str())
    }

    /// Looks up a channel by id.
    pub fn channel(&self, id: &str) -> Option<&ChannelEntry> {
        self.channels.get(id)
    }

    /// Number of loaded users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
