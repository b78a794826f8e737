//! On-disk source cache at ~/.epigeo/sources/.
//!
//! TTL: 32 days, keyed by source URL. Payloads live in one file per URL next
//! to a JSON index carrying the fetch timestamp. A fresh entry is served
//! without touching the network, so each reference source is fetched at most
//! once per freshness window no matter how many calls consume it.

use crate::error::GeoError;
use crate::fetch::http;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CACHE_TTL_MS: i64 = 32 * 24 * 3600 * 1000; // 32 days in ms

#[derive(Serialize, Deserialize, Clone)]
struct IndexEntry {
    file: String,
    timestamp: i64,
}

/// The fetch-once cache for external reference documents.
pub struct SourceCache {
    dir: PathBuf,
    index: HashMap<String, IndexEntry>,
    timeout: Duration,
}

impl SourceCache {
    /// Load the cache from the default location (~/.epigeo/sources/).
    pub fn load() -> Self {
        Self::load_from(Self::default_dir())
    }

    /// Load the cache from a specific directory (for testing).
    pub fn load_from(dir: PathBuf) -> Self {
        let index = Self::read_index(&dir).unwrap_or_default();
        Self {
            dir,
            index,
            timeout: http::DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-fetch network timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".epigeo")
            .join("sources")
    }

    fn read_index(dir: &PathBuf) -> Option<HashMap<String, IndexEntry>> {
        let data = fs::read_to_string(dir.join("index.json")).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Return the body for `url`, fetching it only when absent or stale.
    pub fn get_or_fetch(&mut self, url: &str) -> Result<String, GeoError> {
        if let Some(body) = self.get_fresh(url) {
            return Ok(body);
        }

        tracing::info!(url, "fetching reference source");
        let body = http::get_with_timeout(url, self.timeout)?;
        self.put(url, &body)?;
        Ok(body)
    }

    /// Return the cached body for `url` if present and within the TTL.
    pub fn get_fresh(&self, url: &str) -> Option<String> {
        let entry = self.index.get(url)?;
        let now = chrono::Utc::now().timestamp_millis();
        if now - entry.timestamp > CACHE_TTL_MS {
            return None; // stale
        }
        fs::read_to_string(self.dir.join(&entry.file)).ok()
    }

    /// Store a body under `url` and persist the index. Also the fixture
    /// injection point for offline tests.
    pub fn put(&mut self, url: &str, body: &str) -> Result<(), GeoError> {
        fs::create_dir_all(&self.dir)?;
        let file = format!("{:016x}.dat", fingerprint(url));
        fs::write(self.dir.join(&file), body)?;

        self.index.insert(
            url.to_string(),
            IndexEntry {
                file,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        );
        let json = serde_json::to_string_pretty(&self.index)?;
        fs::write(self.dir.join("index.json"), json)?;
        Ok(())
    }

    /// Number of cached sources (for testing).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// FNV-1a, enough to derive a stable filename from a URL.
fn fingerprint(url: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in url.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_cache() -> (SourceCache, TempDir) {
        let dir = TempDir::new().unwrap();
        (SourceCache::load_from(dir.path().join("sources")), dir)
    }

    #[test]
    fn test_put_then_fresh() {
        let (mut cache, _dir) = test_cache();
        cache.put("https://example.org/table", "<table></table>").unwrap();
        assert_eq!(
            cache.get_fresh("https://example.org/table").unwrap(),
            "<table></table>"
        );
    }

    #[test]
    fn test_get_or_fetch_serves_fresh_without_network() {
        // Network is unreachable in tests; a fresh entry must short-circuit.
        let (mut cache, _dir) = test_cache();
        cache.put("https://example.org/a", "body-a").unwrap();
        let body = cache.get_or_fetch("https://example.org/a").unwrap();
        assert_eq!(body, "body-a");
    }

    #[test]
    fn test_miss() {
        let (cache, _dir) = test_cache();
        assert!(cache.get_fresh("https://example.org/missing").is_none());
    }

    #[test]
    fn test_persistence_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sources");
        {
            let mut cache = SourceCache::load_from(path.clone());
            cache.put("https://example.org/x", "payload").unwrap();
        }
        let cache2 = SourceCache::load_from(path);
        assert_eq!(cache2.get_fresh("https://example.org/x").unwrap(), "payload");
    }

    #[test]
    fn test_stale_entry_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sources");
        let mut cache = SourceCache::load_from(path.clone());
        cache.put("https://example.org/old", "stale").unwrap();

        // Rewrite the index with an expired timestamp.
        let old = chrono::Utc::now().timestamp_millis() - CACHE_TTL_MS - 1000;
        let raw = fs::read_to_string(path.join("index.json")).unwrap();
        let mut index: HashMap<String, IndexEntry> = serde_json::from_str(&raw).unwrap();
        for entry in index.values_mut() {
            entry.timestamp = old;
        }
        fs::write(
            path.join("index.json"),
            serde_json::to_string(&index).unwrap(),
        )
        .unwrap();

        let cache = SourceCache::load_from(path);
        assert!(cache.get_fresh("https://example.org/old").is_none());
    }

    #[test]
    fn test_distinct_urls_distinct_files() {
        let (mut cache, _dir) = test_cache();
        cache.put("https://example.org/a", "aaa").unwrap();
        cache.put("https://example.org/b", "bbb").unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_fresh("https://example.org/a").unwrap(), "aaa");
        assert_eq!(cache.get_fresh("https://example.org/b").unwrap(), "bbb");
    }
}
