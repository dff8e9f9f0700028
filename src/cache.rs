//! # Cache Module
//!
//! Tiered lookup for OAuth usage limits. A [`UsageCache::fetch`] tries, in
//! order and stopping at the first hit:
//!
//! 1. the in-process entry,
//! 2. the JSON file shared by every statusline invocation,
//! 3. one bounded request to the usage endpoint.
//!
//! Freshness is `0 <= now - timestamp < ttl`, evaluated on every read against
//! the caller's TTL. An entry stamped in the future is stale.
//!
//! The disk file is read and written without locking. Two invocations racing
//! on it simply leave the last writer's snapshot in place; any snapshot can be
//! fetched again and the TTL bounds how stale it gets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::credentials::{CredentialResolver, TokenProvider};
use crate::models::UsageLimits;
use crate::usage_api::{HttpUsageClient, UsageClient};
use crate::utils::now_millis;

pub const CACHE_FILE_NAME: &str = "claude-dashboard-cache.json";

/// Usage limits paired with the epoch-millisecond time they were captured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: UsageLimits,
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(data: UsageLimits, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    pub fn is_fresh(&self, now_ms: i64, ttl_seconds: u64) -> bool {
        let ttl_ms = i64::try_from(ttl_seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        let age = now_ms.saturating_sub(self.timestamp);
        (0..ttl_ms).contains(&age)
    }
}

/// Default location of the shared disk tier.
pub fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join(CACHE_FILE_NAME)
}

/// Reads the disk entry. Missing, unreadable or malformed files are all `None`.
pub fn read_disk_entry(path: &Path) -> Option<CacheEntry> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

/// Replaces the disk entry via a uniquely named sibling temp file and rename,
/// so readers see either the old snapshot or the new one. A symlink at `path`
/// is replaced, never written through.
pub fn write_disk_entry(path: &Path, entry: &CacheEntry) -> Result<()> {
    let json = serde_json::to_vec(entry).context("serialize cache entry")?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(&json).context("write cache entry")?;
    tmp.persist(path)
        .with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

/// Memory, disk, then network lookup of usage limits.
///
/// The memory tier belongs to this value; construct one per process and pass
/// it to whoever needs usage data.
pub struct UsageCache {
    memory: Mutex<Option<CacheEntry>>,
    disk_path: PathBuf,
    credentials: Box<dyn TokenProvider>,
    client: Box<dyn UsageClient>,
}

impl UsageCache {
    pub fn new(
        disk_path: PathBuf,
        credentials: impl TokenProvider + 'static,
        client: impl UsageClient + 'static,
    ) -> Self {
        Self {
            memory: Mutex::new(None),
            disk_path,
            credentials: Box::new(credentials),
            client: Box::new(client),
        }
    }

    /// Platform credential chain and the real HTTP client.
    pub fn with_defaults(disk_path: PathBuf) -> Self {
        Self::new(
            disk_path,
            CredentialResolver::platform_default(),
            HttpUsageClient::default(),
        )
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }

    pub fn fetch(&self, ttl_seconds: u64) -> Option<UsageLimits> {
        self.fetch_at(ttl_seconds, now_millis())
    }

    /// [`fetch`](Self::fetch) against an explicit clock.
    pub fn fetch_at(&self, ttl_seconds: u64, now_ms: i64) -> Option<UsageLimits> {
        self.from_memory(ttl_seconds, now_ms)
            .or_else(|| self.from_disk(ttl_seconds, now_ms))
            .or_else(|| self.from_network(now_ms))
    }

    /// Drops the in-process entry. The disk file is left alone.
    pub fn clear_cache(&self) {
        if let Ok(mut memory) = self.memory.lock() {
            *memory = None;
        }
    }

    fn from_memory(&self, ttl_seconds: u64, now_ms: i64) -> Option<UsageLimits> {
        let memory = self.memory.lock().ok()?;
        let entry = memory.as_ref().filter(|e| e.is_fresh(now_ms, ttl_seconds))?;
        debug!(age_ms = now_ms - entry.timestamp, "usage cache hit: memory");
        Some(entry.data.clone())
    }

    fn from_disk(&self, ttl_seconds: u64, now_ms: i64) -> Option<UsageLimits> {
        let entry = read_disk_entry(&self.disk_path)?;
        if !entry.is_fresh(now_ms, ttl_seconds) {
            debug!(age_ms = now_ms - entry.timestamp, "usage disk cache expired");
            return None;
        }
        debug!(age_ms = now_ms - entry.timestamp, "usage cache hit: disk");
        let data = entry.data.clone();
        self.store_memory(entry);
        Some(data)
    }

    fn from_network(&self, now_ms: i64) -> Option<UsageLimits> {
        let Some(token) = self.credentials.resolve() else {
            debug!("no oauth token; skipping usage request");
            return None;
        };
        let data = self.client.fetch_limits(&token)?;
        debug!("usage fetched from network");

        let entry = CacheEntry::new(data.clone(), now_ms);
        if let Err(e) = write_disk_entry(&self.disk_path, &entry) {
            debug!(error = %e, "usage disk cache write failed");
        }
        self.store_memory(entry);
        Some(data)
    }

    fn store_memory(&self, entry: CacheEntry) {
        if let Ok(mut memory) = self.memory.lock() {
            *memory = Some(entry);
        }
    }
}
