//! Pluggable persistence for favorite-id lists.
//!
//! The store never talks to storage directly; it goes through a
//! [`FavoritesBackend`] so the same logic runs against an in-memory map in
//! tests and a JSON file on a device. The persisted value for a scope is
//! the full ordered id list, round-tripped exactly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::scope::Scope;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("favorites storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted payload for a scope could not be decoded. Surfaced
    /// rather than silently reset; the caller decides whether to clear
    /// the scope.
    #[error("favorites for scope {scope} are corrupt: {reason}")]
    Corrupt { scope: String, reason: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable storage keyed by scope.
///
/// `write` must be atomic per scope: a reader immediately after a writer
/// observes the new list, never a partial one.
pub trait FavoritesBackend: Send + Sync {
    /// The stored id list for a scope; empty for a scope never written.
    fn read(&self, scope: &Scope) -> Result<Vec<String>>;

    /// Replace the stored id list for a scope.
    fn write(&self, scope: &Scope, ids: &[String]) -> Result<()>;
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<Scope, Vec<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesBackend for MemoryBackend {
    fn read(&self, scope: &Scope) -> Result<Vec<String>> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(scope).cloned().unwrap_or_default())
    }

    fn write(&self, scope: &Scope, ids: &[String]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(scope.clone(), ids.to_vec());
        Ok(())
    }
}

// ============================================================================
// JSON file backend
// ============================================================================

/// One JSON file per scope under a directory.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a crash mid-write leaves the previous list intact.
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, scope: &Scope) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(scope.as_str())))
    }
}

/// Keep scope-derived file names to a safe character set.
fn sanitize(scope: &str) -> String {
    scope
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl FavoritesBackend for JsonFileBackend {
    fn read(&self, scope: &Scope) -> Result<Vec<String>> {
        let path = self.path_for(scope);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            scope: scope.to_string(),
            reason: e.to_string(),
        })
    }

    fn write(&self, scope: &Scope, ids: &[String]) -> Result<()> {
        let path = self.path_for(scope);
        let tmp_path = tmp_sibling(&path);

        let payload = serde_json::to_vec(ids).map_err(|e| StoreError::Corrupt {
            scope: scope.to_string(),
            reason: e.to_string(),
        })?;

        std::fs::write(&tmp_path, payload)?;
        std::fs::rename(&tmp_path, &path)?;
        tracing::debug!(scope = %scope, count = ids.len(), "favorites persisted");
        Ok(())
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        let scope = Scope::default();

        assert!(backend.read(&scope).unwrap().is_empty());
        backend.write(&scope, &ids(&["2", "1", "9"])).unwrap();
        assert_eq!(backend.read(&scope).unwrap(), ids(&["2", "1", "9"]));
    }

    #[test]
    fn test_memory_backend_scopes_isolated() {
        let backend = MemoryBackend::new();
        backend.write(&Scope::new("a"), &ids(&["1"])).unwrap();

        assert!(backend.read(&Scope::new("b")).unwrap().is_empty());
    }

    #[test]
    fn test_file_backend_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();
        let scope = Scope::new("profile-1");

        backend.write(&scope, &ids(&["9", "2", "5"])).unwrap();
        assert_eq!(backend.read(&scope).unwrap(), ids(&["9", "2", "5"]));

        // Overwrite replaces the whole list
        backend.write(&scope, &ids(&["5"])).unwrap();
        assert_eq!(backend.read(&scope).unwrap(), ids(&["5"]));
    }

    #[test]
    fn test_file_backend_missing_scope_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();

        assert!(backend.read(&Scope::new("never-written")).unwrap().is_empty());
    }

    #[test]
    fn test_file_backend_corrupt_payload_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();
        let scope = Scope::new("bad");

        std::fs::write(dir.path().join("bad.json"), b"{ not json").unwrap();
        assert!(matches!(
            backend.read(&scope),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_file_backend_sanitizes_scope_names() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();
        let scope = Scope::new("user/../../etc");

        backend.write(&scope, &ids(&["1"])).unwrap();
        assert_eq!(backend.read(&scope).unwrap(), ids(&["1"]));
        // The written file stays inside the backend directory.
        assert!(dir.path().join("user-..-..-etc.json").exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();
        backend.write(&Scope::new("s"), &ids(&["1"])).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
