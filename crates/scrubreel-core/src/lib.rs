//! Scroll-position-to-media-position synchronization.
//!
//! The [`ScrollSyncPlayer`] maps scroll progress through a tall tracking
//! region onto the playback position of a seekable media resource. It is
//! host-agnostic: a host forwards scroll, frame, media and gesture events and
//! executes the returned [`SyncEffect`]s. The `web` feature ships a browser
//! host for wasm32 targets.

pub mod cache;
pub mod config;
pub mod error;
pub mod geometry;
pub mod keyframes;
pub mod media;
pub mod player;
pub mod smoothing;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use cache::{CacheState, MediaCache};
pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use geometry::{ProgressWindow, RegionGeometry, scroll_progress};
pub use keyframes::Track;
pub use media::{MediaSource, MediaStatus, ReadyState};
pub use player::{
    ActivationState, FrameInput, ScrollSyncPlayer, SyncEffect, SyncEvent, SyncStatus,
};
pub use smoothing::{Smoother, SmoothingStrategy, SmoothingTier};
