use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{BenefitsTable, default_benefits_table};

pub const CACHE_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum BenefitsError {
    #[error("benefits cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("benefits cache JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitsSource {
    Live,
    Cached,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedBenefits {
    pub data: BenefitsTable,
    pub source: BenefitsSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    data: BenefitsTable,
    timestamp: DateTime<Utc>,
    #[serde(skip)]
    written_here: bool,
}

/// First-home benefits with a memory layer, an optional JSON file behind it,
/// and the static table as the last resort. Entries older than the TTL are
/// ignored.
#[derive(Debug)]
pub struct BenefitsCache {
    path: Option<PathBuf>,
    ttl: Duration,
    memory: Mutex<Option<CacheEntry>>,
}

impl BenefitsCache {
    pub fn new(path: Option<PathBuf>) -> Self {
        let cache = Self {
            path,
            ttl: Duration::hours(CACHE_TTL_HOURS),
            memory: Mutex::new(None),
        };
        cache.reload_from_disk();
        cache
    }

    pub fn get(&self) -> CachedBenefits {
        self.get_at(Utc::now())
    }

    pub fn get_at(&self, now: DateTime<Utc>) -> CachedBenefits {
        if let Some(hit) = self.fresh_entry(now) {
            return hit;
        }

        self.reload_from_disk();
        if let Some(hit) = self.fresh_entry(now) {
            return hit;
        }

        CachedBenefits {
            data: default_benefits_table(),
            source: BenefitsSource::Default,
        }
    }

    pub fn set(&self, data: BenefitsTable) -> Result<(), BenefitsError> {
        self.set_at(data, Utc::now())
    }

    /// Stores `data` in memory, then persists it. The in-memory copy is kept
    /// even if the write fails.
    pub fn set_at(&self, data: BenefitsTable, now: DateTime<Utc>) -> Result<(), BenefitsError> {
        let entry = CacheEntry {
            data,
            timestamp: now,
            written_here: true,
        };
        let serialized = serde_json::to_string(&entry)?;
        *self.lock() = Some(entry);

        if let Some(path) = &self.path {
            fs::write(path, serialized).map_err(|source| BenefitsError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "persisted benefits cache");
        }
        Ok(())
    }

    fn fresh_entry(&self, now: DateTime<Utc>) -> Option<CachedBenefits> {
        let memory = self.lock();
        let entry = memory.as_ref()?;
        if now - entry.timestamp >= self.ttl {
            return None;
        }
        Some(CachedBenefits {
            data: entry.data.clone(),
            source: if entry.written_here {
                BenefitsSource::Live
            } else {
                BenefitsSource::Cached
            },
        })
    }

    fn reload_from_disk(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if !path.exists() {
            return;
        }
        match read_entry(path) {
            Ok(entry) => *self.lock() = Some(entry),
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable benefits cache"),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CacheEntry>> {
        self.memory
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn read_entry(path: &Path) -> Result<CacheEntry, BenefitsError> {
    let raw = fs::read_to_string(path).map_err(|source| BenefitsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Reads a bare `{ "WA": { "grant": .., "stampDutyConcession": .. }, .. }` map.
pub fn load_table(path: &Path) -> Result<BenefitsTable, BenefitsError> {
    let raw = fs::read_to_string(path).map_err(|source| BenefitsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
