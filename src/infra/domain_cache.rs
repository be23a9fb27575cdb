//! File-backed cache of domain availability verdicts.
//!
//! The whole map lives in memory and is mirrored to a single JSON file.
//! Persistence is best effort: read and write failures are logged and the
//! cache keeps working in memory.

use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use fs2::FileExt;
use thiserror::Error;

use crate::domain::{availability::CacheEntry, clock::now_unix_ms};

const CACHE_LOAD_FAILED: &str = "DOMAIN_CACHE_LOAD_FAILED";
const CACHE_SAVE_FAILED: &str = "DOMAIN_CACHE_SAVE_FAILED";

type Entries = BTreeMap<String, CacheEntry>;

#[derive(Debug)]
pub struct DomainCache {
    path: PathBuf,
    expiry: Duration,
    expiry_ms: i64,
    entries: Mutex<Entries>,
}

#[derive(Debug, Error)]
enum CacheFileError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid cache contents: {0}")]
    Json(#[from] serde_json::Error),
}

impl DomainCache {
    /// Opens the cache at `path`, creating the file and its directory when
    /// missing. An unreadable file yields an empty cache and is left on disk
    /// until the next [`DomainCache::save`] overwrites it.
    pub fn open(path: impl Into<PathBuf>, expiry: Duration) -> Self {
        let path = path.into();
        let entries = load_entries(&path);

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            expiry_ms = expiry.as_millis() as u64,
            "domain cache opened"
        );

        Self {
            expiry_ms: i64::try_from(expiry.as_millis()).unwrap_or(i64::MAX),
            path,
            expiry,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Stored entry for `domain`, regardless of its age.
    pub fn get(&self, domain: &str) -> Option<CacheEntry> {
        self.lock().get(domain).cloned()
    }

    /// Snapshot of every stored entry, sorted by domain.
    pub fn entries(&self) -> Vec<(String, CacheEntry)> {
        self.lock()
            .iter()
            .map(|(domain, entry)| (domain.clone(), entry.clone()))
            .collect()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_valid(&self, entry: Option<&CacheEntry>) -> bool {
        self.is_valid_at(entry, now_unix_ms())
    }

    pub fn is_valid_at(&self, entry: Option<&CacheEntry>, now_ms: i64) -> bool {
        entry.is_some_and(|entry| now_ms.saturating_sub(entry.timestamp) < self.expiry_ms)
    }

    /// Replaces the in-memory entry. Nothing is written until `save`.
    pub fn set(&self, domain: &str, entry: CacheEntry) {
        self.lock().insert(domain.to_owned(), entry);
    }

    /// Overwrites the cache file with the full in-memory map.
    pub fn save(&self) {
        let snapshot = self.lock().clone();

        match write_entries(&self.path, &snapshot) {
            Ok(()) => tracing::debug!(
                path = %self.path.display(),
                entries = snapshot.len(),
                "domain cache saved"
            ),
            Err(error) => tracing::error!(
                code = CACHE_SAVE_FAILED,
                path = %self.path.display(),
                error = %error,
                "failed to save domain cache"
            ),
        }
    }

    // A panic while holding the lock cannot leave a half-written entry behind.
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_entries(path: &Path) -> Entries {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(error) = fs::create_dir_all(parent) {
            tracing::warn!(
                code = CACHE_LOAD_FAILED,
                path = %parent.display(),
                error = %error,
                "failed to create domain cache directory"
            );
        }
    }

    if !path.exists() {
        let empty = Entries::new();
        if let Err(error) = write_entries(path, &empty) {
            tracing::warn!(
                code = CACHE_LOAD_FAILED,
                path = %path.display(),
                error = %error,
                "failed to create empty domain cache file"
            );
        }
        return empty;
    }

    match read_entries(path) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(
                code = CACHE_LOAD_FAILED,
                path = %path.display(),
                error = %error,
                "failed to load domain cache, starting empty"
            );
            Entries::new()
        }
    }
}

fn read_entries(path: &Path) -> Result<Entries, CacheFileError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_entries(path: &Path, entries: &Entries) -> Result<(), CacheFileError> {
    let payload = serde_json::to_vec(entries)?;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)?;

    // Released when the handle is dropped.
    FileExt::lock_exclusive(&file)?;
    file.set_len(0)?;
    file.write_all(&payload)?;
    file.flush()?;

    Ok(())
}
