//! Injected cache for media resources that were loaded ahead of time.
//!
//! A page can start buffering a resource long before the section that scrubs
//! it mounts. The cache lets that section pick up the buffered handle instead
//! of loading the source again. Hosts own the cache and pass it to whoever
//! needs it.

use crate::media::MediaSource;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Lifecycle of one cached resource.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheState<H> {
    Empty,
    Loading,
    Ready(H),
    Failed(String),
}

#[derive(Debug)]
pub struct MediaCache<H> {
    entries: HashMap<String, CacheState<H>>,
}

impl<H> Default for MediaCache<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<H: Clone> MediaCache<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: &str) -> CacheState<H> {
        self.entries.get(key).cloned().unwrap_or(CacheState::Empty)
    }

    pub fn get(&self, key: &str) -> Option<H> {
        match self.entries.get(key) {
            Some(CacheState::Ready(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Marks `key` as loading. Returns false when a load is already in flight
    /// or finished, in which case the caller must not start another one.
    pub fn begin_loading(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(CacheState::Loading) | Some(CacheState::Ready(_)) => {
                debug!(key, "Media already loading or cached");
                false
            }
            _ => {
                self.entries.insert(key.to_string(), CacheState::Loading);
                true
            }
        }
    }

    pub fn complete(&mut self, key: &str, handle: H) {
        debug!(key, "Media cached");
        self.entries
            .insert(key.to_string(), CacheState::Ready(handle));
    }

    pub fn fail(&mut self, key: &str, error: impl Into<String>) {
        let error = error.into();
        warn!(key, %error, "Media preload failed");
        self.entries
            .insert(key.to_string(), CacheState::Failed(error));
    }

    pub fn evict(&mut self, key: &str) -> Option<H> {
        match self.entries.remove(key) {
            Some(CacheState::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Resolves the source to hand to a scrubbing section.
    pub fn source_for(&self, key: &str) -> MediaSource<H> {
        match self.get(key) {
            Some(handle) => MediaSource::Prewarmed(handle),
            None => MediaSource::Url(key.to_string()),
        }
    }
}
