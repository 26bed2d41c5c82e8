use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::collections::BTreeMap;
use std::future::Future;

/// City → country mapping persisted between runs.
///
/// A `None` value records a city that was looked up without finding a country,
/// so it is not asked for again.
#[derive(Debug, Clone, Default)]
pub struct LocationCache {
    entries: BTreeMap<String, Option<String>>,
    hits: usize,
    misses: usize,
    dirty: bool,
}

impl LocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 載入快取檔案；檔案不存在時回傳 `CacheError`
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let bytes = storage
            .read_file(path)
            .await
            .map_err(|e| cache_read_error(path, e))?;
        Self::from_bytes(path, &bytes)
    }

    /// Like [`LocationCache::load`], but a missing file yields an empty cache.
    pub async fn load_or_default<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        match storage.read_file(path).await {
            Ok(bytes) => Self::from_bytes(path, &bytes),
            Err(EtlError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("🆕 No cache at {}, starting with an empty one", path);
                Ok(Self::new())
            }
            Err(e) => Err(cache_read_error(path, e)),
        }
    }

    fn from_bytes(path: &str, bytes: &[u8]) -> Result<Self> {
        let entries: BTreeMap<String, Option<String>> =
            serde_json::from_slice(bytes).map_err(|e| EtlError::CacheError {
                path: path.to_string(),
                message: format!("invalid cache contents: {}", e),
            })?;

        tracing::debug!("Loaded {} cached cities from {}", entries.len(), path);
        Ok(Self {
            entries,
            ..Self::default()
        })
    }

    pub async fn save<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let data = serde_json::to_vec_pretty(&self.entries)?;
        storage.write_file(path, &data).await?;
        tracing::debug!("Saved {} cached cities to {}", self.entries.len(), path);
        Ok(())
    }

    pub fn get(&self, city: &str) -> Option<&Option<String>> {
        self.entries.get(city)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(city)
    }

    /// Cached value for `city`, counted as a hit or a miss.
    pub fn lookup(&mut self, city: &str) -> Option<Option<String>> {
        match self.entries.get(city) {
            Some(cached) => {
                self.hits += 1;
                Some(cached.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Return the cached value for `city`, or run `resolve` and remember what
    /// it returns. A failed resolve is passed through and nothing is stored.
    pub async fn get_or_resolve<F, Fut>(&mut self, city: &str, resolve: F) -> Result<Option<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<String>>>,
    {
        if let Some(cached) = self.lookup(city) {
            return Ok(cached);
        }

        let resolved = resolve().await?;
        self.entries.insert(city.to_string(), resolved.clone());
        self.dirty = true;
        Ok(resolved)
    }

    /// Remember a city/country pair learned elsewhere, keeping any existing entry.
    pub fn seed(&mut self, city: &str, country: &str) -> bool {
        if self.entries.contains_key(city) {
            return false;
        }
        self.entries
            .insert(city.to_string(), Some(country.to_string()));
        self.dirty = true;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Whether anything was added since the cache was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

fn cache_read_error(path: &str, error: EtlError) -> EtlError {
    match error {
        EtlError::IoError(io) => EtlError::CacheError {
            path: path.to_string(),
            message: io.to_string(),
        },
        other => other,
    }
}
