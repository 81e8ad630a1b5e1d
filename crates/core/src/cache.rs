//! Read-through snapshot cache for resolved projects.
//!
//! The cache holds the last known snapshot of each project in a single JSON
//! file and is consulted only when the authoritative store errors on the
//! preview path. It is refreshed after every successful store read or
//! write and is never treated as a source of truth: a write that only
//! reached the cache does not exist.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::status::ProjectStatus;
use crate::types::{DbId, Timestamp};

/// Cached rendition of a version attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionSnapshot {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub audio_url: String,
    pub recommended: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub created_at: Timestamp,
}

/// Cached rendition of a feedback history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackSnapshot {
    pub content: String,
    pub created_at: Timestamp,
}

/// Last known state of a project, as served to the preview page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSnapshot {
    pub id: DbId,
    pub preview_code: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    pub status: ProjectStatus,
    pub versions: Vec<VersionSnapshot>,
    pub feedback: Vec<FeedbackSnapshot>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    /// When this snapshot was taken from the authoritative store.
    pub cached_at: Timestamp,
}

/// File-backed store of [`ProjectSnapshot`]s.
///
/// All operations take the internal mutex; the file is rewritten in full on
/// every mutation (snapshot counts are small). A missing or corrupt file is
/// treated as an empty cache, never as an error.
pub struct SnapshotCache {
    path: PathBuf,
    entries: Mutex<Vec<ProjectSnapshot>>,
}

impl SnapshotCache {
    /// Open (or lazily create) the cache at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt snapshot cache, starting empty");
                Vec::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable snapshot cache, starting empty");
                Vec::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Insert or replace the snapshot for a project (matched by id).
    pub fn upsert(&self, snapshot: ProjectSnapshot) {
        let mut entries = self.entries.lock().expect("snapshot cache poisoned");
        match entries.iter_mut().find(|s| s.id == snapshot.id) {
            Some(existing) => *existing = snapshot,
            None => entries.push(snapshot),
        }
        self.persist(&entries);
    }

    /// Find a snapshot by preview code (exact) or by project id.
    pub fn find(&self, token: &str, id: Option<DbId>) -> Option<ProjectSnapshot> {
        let entries = self.entries.lock().expect("snapshot cache poisoned");
        entries
            .iter()
            .find(|s| s.preview_code.as_deref() == Some(token) || Some(s.id) == id)
            .cloned()
    }

    /// Drop the snapshot for a project, if present.
    pub fn invalidate(&self, id: DbId) {
        let mut entries = self.entries.lock().expect("snapshot cache poisoned");
        let before = entries.len();
        entries.retain(|s| s.id != id);
        if entries.len() != before {
            self.persist(&entries);
        }
    }

    /// Number of cached snapshots.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("snapshot cache poisoned").len()
    }

    /// Whether the cache holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Synchronous whole-file write, held under the entries lock. At a few
    // hundred snapshots this blocks for well under a millisecond; revisit
    // with spawn_blocking if snapshot counts ever grow past that.
    fn persist(&self, entries: &[ProjectSnapshot]) {
        let json = match serde_json::to_vec_pretty(entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize snapshot cache");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            // Losing the cache file degrades the fallback path, nothing else.
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist snapshot cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: DbId, code: Option<&str>) -> ProjectSnapshot {
        ProjectSnapshot {
            id,
            preview_code: code.map(str::to_string),
            client_name: "Helena Duarte".to_string(),
            client_email: "helena@example.com".to_string(),
            package_type: "single".to_string(),
            status: ProjectStatus::Waiting,
            versions: Vec::new(),
            feedback: Vec::new(),
            expires_at: None,
            created_at: chrono::Utc::now(),
            cached_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_upsert_and_find_by_code() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::open(dir.path().join("projects.json"));

        cache.upsert(snapshot(1, Some("HAR-2025-001")));
        let found = cache.find("HAR-2025-001", None).expect("should find by code");
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_find_by_id_when_code_does_not_match() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::open(dir.path().join("projects.json"));

        cache.upsert(snapshot(7, None));
        assert!(cache.find("no-such-code", Some(7)).is_some());
        assert!(cache.find("no-such-code", Some(8)).is_none());
    }

    #[test]
    fn test_upsert_replaces_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::open(dir.path().join("projects.json"));

        cache.upsert(snapshot(3, Some("HAR-2025-003")));
        let mut updated = snapshot(3, Some("HAR-2025-003"));
        updated.status = ProjectStatus::Feedback;
        cache.upsert(updated);

        assert_eq!(cache.len(), 1);
        let found = cache.find("HAR-2025-003", None).unwrap();
        assert_eq!(found.status, ProjectStatus::Feedback);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");

        {
            let cache = SnapshotCache::open(&path);
            cache.upsert(snapshot(5, Some("HAR-2025-005")));
        }

        let reopened = SnapshotCache::open(&path);
        assert_eq!(reopened.len(), 1);
        assert!(reopened.find("HAR-2025-005", None).is_some());
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::open(dir.path().join("projects.json"));

        cache.upsert(snapshot(9, Some("HAR-2025-009")));
        cache.invalidate(9);
        assert!(cache.is_empty());
        assert!(cache.find("HAR-2025-009", Some(9)).is_none());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let cache = SnapshotCache::open(&path);
        assert!(cache.is_empty());
    }
}
