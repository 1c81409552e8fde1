use crate::modules::media::MediaRecord;
use crate::shared::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::CacheStore;

/// One persisted cache entry. The key is stored alongside the record so the
/// on-disk file round-trips exactly what the in-memory index holds.
#[derive(Debug, Serialize, Deserialize)]
struct CacheLine {
    key: String,
    record: MediaRecord,
}

/// File-backed implementation of [`CacheStore`].
///
/// Keeps the full record set in a concurrent in-memory index for fast reads
/// and rewrites a JSON-lines snapshot after every successful mutation. The
/// snapshot is written to a sibling temp file and renamed into place, so a
/// crash mid-write leaves the previous snapshot intact. There is no TTL and
/// no eviction; entries live until explicitly overwritten or removed.
pub struct JsonFileStore {
    path: PathBuf,
    index: DashMap<String, MediaRecord>,
    // Serializes snapshot writes; index mutations themselves are lock-free.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing snapshot. A missing file
    /// starts an empty store; unparsable lines are skipped with a warning
    /// rather than failing the whole load.
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let index = DashMap::new();

        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let mut skipped = 0usize;
            for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                match serde_json::from_str::<CacheLine>(line) {
                    Ok(entry) => {
                        index.insert(entry.key, entry.record);
                    }
                    Err(e) => {
                        skipped += 1;
                        log::warn!("Skipping unparsable cache line: {}", e);
                    }
                }
            }
            log::info!(
                "Loaded {} cached records from {} ({} lines skipped)",
                index.len(),
                path.display(),
                skipped
            );
        }

        Ok(Self {
            path,
            index,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the on-disk snapshot from the current index.
    async fn persist(&self) -> CatalogResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut contents = String::new();
        for entry in self.index.iter() {
            // A failure here is a broken snapshot write, not a bad provider
            // payload, so it must not land in the malformed-response bucket.
            let line = serde_json::to_string(&CacheLine {
                key: entry.key().clone(),
                record: entry.value().clone(),
            })
            .map_err(|e| CatalogError::Storage(format!("unserializable cache entry: {}", e)))?;
            contents.push_str(&line);
            contents.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, contents).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!("Persisted {} cache entries to {}", self.index.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl CacheStore for JsonFileStore {
    async fn get(&self, key: &str) -> CatalogResult<Option<MediaRecord>> {
        match self.index.get(key) {
            Some(entry) => {
                debug!("Cache hit for key: {}", key);
                Ok(Some(entry.value().clone()))
            }
            None => {
                debug!("Cache miss for key: {}", key);
                Ok(None)
            }
        }
    }

    async fn upsert(&self, key: &str, record: MediaRecord) -> CatalogResult<()> {
        self.index.insert(key.to_string(), record);
        self.persist().await
    }

    async fn upsert_if_absent(&self, key: &str, record: MediaRecord) -> CatalogResult<bool> {
        // The entry guard must be dropped before persisting: holding a shard
        // lock across an await point can deadlock other writers.
        let written = {
            match self.index.entry(key.to_string()) {
                dashmap::mapref::entry::Entry::Occupied(_) => false,
                dashmap::mapref::entry::Entry::Vacant(slot) => {
                    slot.insert(record);
                    true
                }
            }
        };

        if written {
            self.persist().await?;
        }
        Ok(written)
    }

    async fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    async fn remove(&self, key: &str) -> CatalogResult<bool> {
        let removed = self.index.remove(key).is_some();
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    async fn len(&self) -> usize {
        self.index.len()
    }

    async fn search_title(&self, query: &str) -> Vec<MediaRecord> {
        let needle = query.to_lowercase();
        self.index
            .iter()
            .filter(|entry| entry.value().title.to_lowercase().contains(&needle))
            .map(|entry| entry.value().clone())
            .collect()
    }

    async fn search_genre(&self, genre: &str) -> Vec<MediaRecord> {
        let wanted = genre.to_lowercase();
        self.index
            .iter()
            .filter(|entry| {
                entry
                    .value()
                    .genres
                    .iter()
                    .any(|g| g.to_lowercase() == wanted)
            })
            .map(|entry| entry.value().clone())
            .collect()
    }
}
