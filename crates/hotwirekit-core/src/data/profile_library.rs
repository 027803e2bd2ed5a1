//! Profile library - lookup and caching of canonical profile text
//!
//! The toolpath engine resolves each rib's profile once per generation run
//! through a [`ProfileSource`]. Caching is never global: callers inject a
//! [`ProfileCache`] and wrap their source in a [`CachedProfileSource`].

use crate::error::ProfileSourceError;
use crate::geometry::profile::Profile;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File extension used for canonical profile files
pub const PROFILE_EXTENSION: &str = "dat";

/// Synchronous profile lookup capability
pub trait ProfileSource: Send + Sync {
    /// Return the canonical profile text for `identifier`
    fn resolve(&self, identifier: &str) -> Result<Arc<str>, ProfileSourceError>;

    /// Resolve and parse a profile
    fn load_profile(&self, identifier: &str) -> Result<Profile, ProfileSourceError> {
        let text = self.resolve(identifier)?;
        Profile::from_selig(&text).map_err(|source| ProfileSourceError::Parse {
            identifier: identifier.to_string(),
            source,
        })
    }
}

/// Injected cache capability (get/put/iterate)
pub trait ProfileCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Arc<str>>;

    fn put(&self, key: &str, data: Arc<str>) -> Result<(), ProfileSourceError>;

    /// Every key currently held, sorted
    fn keys(&self) -> Vec<String>;
}

/// Profiles stored as `<id>` or `<id>.dat` files under one directory
#[derive(Debug, Clone)]
pub struct DirectoryProfileSource {
    root: PathBuf,
}

impl DirectoryProfileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProfileSource for DirectoryProfileSource {
    fn resolve(&self, identifier: &str) -> Result<Arc<str>, ProfileSourceError> {
        if !is_plain_identifier(identifier) {
            return Err(ProfileSourceError::NotFound {
                identifier: identifier.to_string(),
            });
        }

        let candidates = [
            self.root.join(identifier),
            self.root
                .join(format!("{}.{}", identifier, PROFILE_EXTENSION)),
        ];
        if let Some(path) = candidates.iter().find(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "reading profile");
            let text = fs::read_to_string(path)?;
            return Ok(Arc::from(text));
        }

        Err(ProfileSourceError::NotFound {
            identifier: identifier.to_string(),
        })
    }
}

/// In-memory cache
#[derive(Debug, Default)]
pub struct MemoryProfileCache {
    entries: RwLock<HashMap<String, Arc<str>>>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ProfileCache for MemoryProfileCache {
    fn get(&self, key: &str) -> Option<Arc<str>> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, data: Arc<str>) -> Result<(), ProfileSourceError> {
        self.entries.write().insert(key.to_string(), data);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// File-backed cache, one `<key>.dat` file per entry.
///
/// Keys are percent-escaped into file stems, so distinct keys never share a
/// file and [`ProfileCache::keys`] returns them exactly as stored.
#[derive(Debug, Clone)]
pub struct DirectoryProfileCache {
    root: PathBuf,
}

impl DirectoryProfileCache {
    /// Open (and create if needed) a cache directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ProfileSourceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", file_stem_for(key), PROFILE_EXTENSION))
    }
}

impl ProfileCache for DirectoryProfileCache {
    fn get(&self, key: &str) -> Option<Arc<str>> {
        fs::read_to_string(self.path_for(key)).ok().map(Arc::from)
    }

    fn put(&self, key: &str, data: Arc<str>) -> Result<(), ProfileSourceError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data.as_bytes())?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == PROFILE_EXTENSION))
            .filter_map(|p| {
                p.file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(key_for_file_stem)
            })
            .collect();
        keys.sort();
        keys
    }
}

type FetchSlot = Arc<Mutex<()>>;

/// A profile source backed by an injected cache.
///
/// Concurrent callers asking for the same key wait for a single fetch
/// instead of hitting the underlying source in parallel. Failed fetches are
/// not cached.
pub struct CachedProfileSource<S, C> {
    source: S,
    cache: C,
    in_flight: Mutex<HashMap<String, FetchSlot>>,
}

impl<S: ProfileSource, C: ProfileCache> CachedProfileSource<S, C> {
    pub fn new(source: S, cache: C) -> Self {
        Self {
            source,
            cache,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    fn fetch(&self, identifier: &str) -> Result<Arc<str>, ProfileSourceError> {
        let slot = self
            .in_flight
            .lock()
            .entry(identifier.to_string())
            .or_default()
            .clone();

        let result = {
            let _guard = slot.lock();
            // another caller may have filled the cache while we waited
            match self.cache.get(identifier) {
                Some(hit) => Ok(hit),
                None => self.source.resolve(identifier).map(|data| {
                    if let Err(e) = self.cache.put(identifier, data.clone()) {
                        tracing::warn!(identifier, error = %e, "failed to store profile in cache");
                    }
                    data
                }),
            }
        };

        // slots are only cloned and dropped under the map lock
        let mut in_flight = self.in_flight.lock();
        if Arc::strong_count(&slot) == 2 {
            in_flight.remove(identifier);
        }
        drop(slot);
        drop(in_flight);

        result
    }
}

impl<S: ProfileSource, C: ProfileCache> ProfileSource for CachedProfileSource<S, C> {
    fn resolve(&self, identifier: &str) -> Result<Arc<str>, ProfileSourceError> {
        if let Some(hit) = self.cache.get(identifier) {
            tracing::debug!(identifier, "profile cache hit");
            return Ok(hit);
        }
        self.fetch(identifier)
    }
}

fn is_plain_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier != "."
        && identifier != ".."
        && !identifier.contains(['/', '\\'])
}

fn is_stem_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_')
}

/// Escape every byte outside `[A-Za-z0-9_-]` as `%XX`
fn file_stem_for(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if is_stem_safe(byte) {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

/// Inverse of [`file_stem_for`]; `None` for stems it never produces
fn key_for_file_stem(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let mut key = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = stem.get(i + 1..i + 3)?;
                let byte = u8::from_str_radix(hex, 16).ok()?;
                if is_stem_safe(byte) || hex.bytes().any(|b| b.is_ascii_lowercase()) {
                    return None;
                }
                key.push(byte);
                i += 3;
            }
            b if is_stem_safe(b) => {
                key.push(b);
                i += 1;
            }
            _ => return None,
        }
    }
    String::from_utf8(key).ok()
}
