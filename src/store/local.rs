// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local slot store: named string-keyed JSON documents per profile scope.
//!
//! Each scope is a directory under the data dir; each slot is one JSON
//! file holding a whole collection (or the profile record). Reads and
//! writes always cover the entire document. Undecodable content is
//! logged and treated as absent, never surfaced to the caller.
//!
//! The original design assumed a single execution context and performed
//! bare read-modify-write cycles. This service is multi-threaded, so
//! callers must hold the scope's write lock (`lock_scope`) across any
//! read-modify-write sequence.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Local JSON slot store, cheap to clone.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    data_dir: PathBuf,
    /// Per-scope write serialization locks, created on first use
    scope_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LocalStore {
    /// Create a store rooted at `data_dir`. Directories are created
    /// lazily on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                data_dir: data_dir.into(),
                scope_locks: DashMap::new(),
            }),
        }
    }

    /// Derive the storage scope key for a profile email.
    pub fn scope_for_email(email: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(email.trim().to_lowercase().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Acquire the scope's write lock. Mutating callers hold this guard
    /// across their whole read-modify-write sequence.
    pub async fn lock_scope(&self, scope: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .scope_locks
            .entry(scope.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Read a slot, treating missing or undecodable content as absent.
    pub async fn read_slot<T: DeserializeOwned>(&self, scope: &str, slot: &str) -> Option<T> {
        let path = self.slot_path(scope, slot);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read slot");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                // Corrupt stored data: recover locally by treating the
                // slot as empty.
                tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt slot");
                None
            }
        }
    }

    /// Replace a slot with the given value (temp file + rename).
    pub async fn write_slot<T: Serialize>(
        &self,
        scope: &str,
        slot: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let path = self.slot_path(scope, slot);
        let parent = path.parent().expect("slot path always has a parent");

        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::Storage(format!("create {}: {}", parent.display(), e)))?;

        let json = serde_json::to_vec(value)
            .map_err(|e| AppError::Storage(format!("encode slot {}: {}", slot, e)))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::Storage(format!("rename {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Remove a slot. Removing an absent slot is not an error.
    pub async fn remove_slot(&self, scope: &str, slot: &str) -> Result<(), AppError> {
        let path = self.slot_path(scope, slot);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "remove {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn slot_path(&self, scope: &str, slot: &str) -> PathBuf {
        self.inner.data_dir.join(scope).join(format!("{slot}.json"))
    }

    /// Data directory root (for diagnostics).
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_for_email_normalizes() {
        let a = LocalStore::scope_for_email("Player@Example.com");
        let b = LocalStore::scope_for_email("  player@example.com ");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_scope_for_email_distinct() {
        let a = LocalStore::scope_for_email("a@example.com");
        let b = LocalStore::scope_for_email("b@example.com");
        assert_ne!(a, b);
    }
}
