//! Scroll-driven media synchronization.
//!
//! `ScrollSyncPlayer` is a pure state machine. Hosts feed it [`SyncEvent`]s
//! from their event loop and execute the [`SyncEffect`]s it returns: attach or
//! detach listeners, schedule the next animation frame, prime the media, seek.
//! Nothing here touches a platform API.

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::geometry::RegionGeometry;
use crate::media::MediaStatus;
use crate::smoothing::{Smoother, lerp};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, trace, warn};

/// Platform permission to drive the media programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationState {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeOrigin {
    Silent,
    Gesture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
    /// `requested` is set when `activate()` ran before metadata was known.
    Locked { requested: bool },
    Probing(ProbeOrigin),
    AwaitingGesture,
    Unlocked,
    /// The gesture retry failed too; no further attempts this lifecycle.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Listeners {
    scroll: bool,
    media: bool,
    gestures: bool,
}

/// Everything the host measures inside one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Frame timestamp in milliseconds on any monotonic clock.
    pub timestamp_ms: f64,
    /// `None` when the region element is no longer mounted.
    pub geometry: Option<RegionGeometry>,
    /// Playback position the media element reports, if readable.
    pub media_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Scrolled { offset: f64 },
    Frame(FrameInput),
    MediaChanged(MediaStatus),
    MediaFailed(String),
    /// Outcome of a [`SyncEffect::Prime`]; errors are `SyncError::ActivationDenied`.
    PrimeResolved(std::result::Result<(), SyncError>),
    UserGesture,
    SeekRejected { position: f64 },
}

/// Work the host must perform on behalf of the player.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEffect {
    AttachScroll,
    DetachScroll,
    AttachMediaEvents,
    DetachMediaEvents,
    AttachGestures,
    DetachGestures,
    RequestFrame,
    CancelFrame,
    /// Muted play, pause, return to zero. Must run inside the current event
    /// handler so a user gesture still counts.
    Prime,
    Seek(f64),
    ReadinessChanged(bool),
}

/// Snapshot for presentation layers and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncStatus {
    pub activation: ActivationState,
    pub media_seekable: bool,
    pub ready: bool,
    pub running: bool,
    pub progress: f64,
    pub position: f64,
}

pub struct ScrollSyncPlayer {
    config: SyncConfig,
    smoother: Box<dyn Smoother>,
    lifecycle: Lifecycle,
    listeners: Listeners,
    frame_pending: bool,
    scroll_offset: Option<f64>,
    last_raw_progress: Option<f64>,
    progress: f64,
    position: f64,
    applied_position: Option<f64>,
    last_seek_ms: Option<f64>,
    media: MediaStatus,
    activation: Activation,
    ready: bool,
}

impl fmt::Debug for ScrollSyncPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSyncPlayer")
            .field("lifecycle", &self.lifecycle)
            .field("activation", &self.activation)
            .field("media", &self.media)
            .field("progress", &self.progress)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl ScrollSyncPlayer {
    /// Builds a player that smooths progress with the configured strategy.
    pub fn new(config: SyncConfig) -> Result<Self> {
        let smoother = Box::new(config.progress_smoothing.clone());
        Self::build(config, smoother)
    }

    /// Builds a player with a custom progress smoother.
    pub fn with_smoother(config: SyncConfig, smoother: impl Smoother + 'static) -> Result<Self> {
        Self::build(config, Box::new(smoother))
    }

    fn build(config: SyncConfig, smoother: Box<dyn Smoother>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            smoother,
            lifecycle: Lifecycle::Idle,
            listeners: Listeners::default(),
            frame_pending: false,
            scroll_offset: None,
            last_raw_progress: None,
            progress: 0.0,
            position: 0.0,
            applied_position: None,
            last_seek_ms: None,
            media: MediaStatus::default(),
            activation: Activation::Locked { requested: false },
            ready: false,
        })
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn activation(&self) -> ActivationState {
        if self.activation == Activation::Unlocked {
            ActivationState::Unlocked
        } else {
            ActivationState::Locked
        }
    }

    pub fn media(&self) -> MediaStatus {
        self.media
    }

    /// True once the media is unlocked and seekable.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            activation: self.activation(),
            media_seekable: self.media.is_seekable(),
            ready: self.ready,
            running: self.is_running(),
            progress: self.progress,
            position: self.position,
        }
    }

    /// Attaches listeners and schedules the first frame.
    ///
    /// `region` is the current geometry of the mounted tracking region; `None`
    /// means the caller has no element to track, which is a contract error.
    pub fn start(&mut self, region: Option<RegionGeometry>) -> Result<Vec<SyncEffect>> {
        let region = region.ok_or(SyncError::RegionNotMounted)?;
        if self.lifecycle == Lifecycle::Running {
            debug!("Scroll sync already running");
            return Ok(Vec::new());
        }

        self.lifecycle = Lifecycle::Running;
        let mut effects = Vec::new();
        if !self.listeners.scroll {
            self.listeners.scroll = true;
            effects.push(SyncEffect::AttachScroll);
        }
        if !self.listeners.media {
            self.listeners.media = true;
            effects.push(SyncEffect::AttachMediaEvents);
        }
        self.request_frame(&mut effects);
        info!(
            top = region.top,
            height = region.height,
            viewport = region.viewport_height,
            "Scroll sync started"
        );

        if self.activation == Activation::AwaitingGesture {
            self.attach_gestures(&mut effects);
        } else if self.config.auto_activate {
            effects.extend(self.activate());
        }
        self.refresh_readiness(&mut effects);
        Ok(effects)
    }

    /// Cancels the pending frame and detaches every listener.
    ///
    /// Safe to call repeatedly and before `start()`; extra calls return no
    /// effects.
    pub fn stop(&mut self) -> Vec<SyncEffect> {
        let mut effects = Vec::new();
        if self.frame_pending {
            self.frame_pending = false;
            effects.push(SyncEffect::CancelFrame);
        }
        if self.listeners.scroll {
            self.listeners.scroll = false;
            effects.push(SyncEffect::DetachScroll);
        }
        if self.listeners.gestures {
            self.listeners.gestures = false;
            effects.push(SyncEffect::DetachGestures);
        }
        if self.listeners.media {
            self.listeners.media = false;
            effects.push(SyncEffect::DetachMediaEvents);
        }
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Stopped;
            info!("Scroll sync stopped");
        }
        effects
    }

    /// Starts the one-shot priming handshake.
    ///
    /// No-op while a probe is in flight, while waiting for a gesture, and once
    /// unlocked. Before metadata is known the request is remembered and the
    /// probe runs as soon as the media reports it.
    pub fn activate(&mut self) -> Vec<SyncEffect> {
        match self.activation {
            Activation::Locked { .. } => {
                if self.media.has_metadata() {
                    self.begin_probe(ProbeOrigin::Silent)
                } else {
                    debug!("Deferring activation until media metadata loads");
                    self.activation = Activation::Locked { requested: true };
                    Vec::new()
                }
            }
            Activation::Probing(_) => {
                debug!("Activation probe already in flight");
                Vec::new()
            }
            Activation::AwaitingGesture | Activation::Unlocked | Activation::Exhausted => {
                Vec::new()
            }
        }
    }

    pub fn handle(&mut self, event: SyncEvent) -> Vec<SyncEffect> {
        match event {
            SyncEvent::Scrolled { offset } => {
                if offset.is_finite() {
                    self.scroll_offset = Some(offset);
                }
                Vec::new()
            }
            SyncEvent::Frame(input) => self.handle_frame(input),
            SyncEvent::MediaChanged(status) => self.handle_media_changed(status),
            SyncEvent::MediaFailed(reason) => self.handle_media_failed(reason),
            SyncEvent::PrimeResolved(result) => self.handle_prime_resolved(result),
            SyncEvent::UserGesture => self.handle_user_gesture(),
            SyncEvent::SeekRejected { position } => {
                let err = SyncError::SeekRejected { position };
                debug!(error = %err, "Retrying seek next frame");
                if self.applied_position == Some(position) {
                    self.applied_position = None;
                }
                self.last_seek_ms = None;
                Vec::new()
            }
        }
    }

    fn handle_frame(&mut self, input: FrameInput) -> Vec<SyncEffect> {
        self.frame_pending = false;
        if self.lifecycle != Lifecycle::Running {
            trace!("Dropping frame delivered after stop");
            return Vec::new();
        }
        let Some(geometry) = input.geometry else {
            warn!("Tracking region unmounted; cancelling scroll sync");
            return self.stop();
        };

        let mut effects = Vec::new();
        let epsilon = self.config.settle_epsilon;

        let raw = geometry.progress(self.scroll_offset.unwrap_or(0.0));
        let velocity = self
            .last_raw_progress
            .map(|previous| raw - previous)
            .unwrap_or(0.0);
        self.last_raw_progress = Some(raw);
        let next = self.smoother.next(self.progress, raw, velocity);
        self.progress = settle(next, raw, epsilon).clamp(0.0, 1.0);

        self.request_frame(&mut effects);

        if !self.media.is_seekable() {
            return effects;
        }
        let Some(duration) = self.media.duration else {
            return effects;
        };

        let target = self.config.window.map(self.progress) * duration;
        let next = lerp(self.position, target, self.config.time_smoothing);
        self.position = settle(next, target, epsilon).clamp(0.0, duration);

        if self.activation != Activation::Unlocked {
            return effects;
        }
        if let Some(last) = self.last_seek_ms {
            let elapsed = input.timestamp_ms - last;
            if elapsed >= 0.0 && elapsed < self.config.min_seek_interval_ms {
                return effects;
            }
        }

        let current = input
            .media_time
            .filter(|t| t.is_finite())
            .or(self.applied_position)
            .unwrap_or(0.0);
        if (current - self.position).abs() > self.config.min_seek_delta_secs {
            trace!(
                progress = self.progress,
                position = self.position,
                "Seeking media"
            );
            effects.push(SyncEffect::Seek(self.position));
            self.applied_position = Some(self.position);
            self.last_seek_ms = Some(input.timestamp_ms);
        }
        effects
    }

    fn handle_media_changed(&mut self, status: MediaStatus) -> Vec<SyncEffect> {
        let previous = self.media;
        self.media = status;
        if previous.ready_state != status.ready_state {
            debug!(
                from = %previous.ready_state,
                to = %status.ready_state,
                duration = ?status.duration,
                "Media readiness changed"
            );
        }

        let mut effects = Vec::new();
        if self.activation == (Activation::Locked { requested: true }) && status.has_metadata() {
            effects.extend(self.begin_probe(ProbeOrigin::Silent));
        }
        self.refresh_readiness(&mut effects);
        effects
    }

    fn handle_media_failed(&mut self, reason: String) -> Vec<SyncEffect> {
        let err = SyncError::PlaybackUnavailable(reason);
        warn!(error = %err, "Media unavailable; fallback stays visible");
        self.media = MediaStatus::default();
        let mut effects = Vec::new();
        self.refresh_readiness(&mut effects);
        effects
    }

    fn handle_prime_resolved(
        &mut self,
        result: std::result::Result<(), SyncError>,
    ) -> Vec<SyncEffect> {
        let Activation::Probing(origin) = self.activation else {
            debug!("Ignoring prime result without a probe in flight");
            return Vec::new();
        };

        let mut effects = Vec::new();
        match result {
            Ok(()) => {
                self.activation = Activation::Unlocked;
                // Priming leaves the media parked at zero.
                self.applied_position = Some(0.0);
                self.last_seek_ms = None;
                info!(?origin, "Media playback unlocked");
                if self.listeners.gestures {
                    self.listeners.gestures = false;
                    effects.push(SyncEffect::DetachGestures);
                }
                self.refresh_readiness(&mut effects);
            }
            Err(err) => match origin {
                ProbeOrigin::Silent => {
                    warn!(error = %err, "Silent prime rejected; waiting for a user gesture");
                    self.activation = Activation::AwaitingGesture;
                    if self.lifecycle == Lifecycle::Running {
                        self.attach_gestures(&mut effects);
                    }
                }
                ProbeOrigin::Gesture => {
                    warn!(error = %err, "Prime rejected inside a user gesture; media stays locked");
                    self.activation = Activation::Exhausted;
                }
            },
        }
        effects
    }

    fn handle_user_gesture(&mut self) -> Vec<SyncEffect> {
        if self.activation != Activation::AwaitingGesture || !self.listeners.gestures {
            return Vec::new();
        }
        self.listeners.gestures = false;
        let mut effects = vec![SyncEffect::DetachGestures];
        debug!("Retrying prime inside user gesture");
        effects.extend(self.begin_probe(ProbeOrigin::Gesture));
        effects
    }

    fn begin_probe(&mut self, origin: ProbeOrigin) -> Vec<SyncEffect> {
        debug!(?origin, "Priming media");
        self.activation = Activation::Probing(origin);
        vec![SyncEffect::Prime]
    }

    fn attach_gestures(&mut self, effects: &mut Vec<SyncEffect>) {
        if !self.listeners.gestures {
            self.listeners.gestures = true;
            effects.push(SyncEffect::AttachGestures);
        }
    }

    fn request_frame(&mut self, effects: &mut Vec<SyncEffect>) {
        if !self.frame_pending {
            self.frame_pending = true;
            effects.push(SyncEffect::RequestFrame);
        }
    }

    fn refresh_readiness(&mut self, effects: &mut Vec<SyncEffect>) {
        let ready = self.activation == Activation::Unlocked && self.media.is_seekable();
        if ready != self.ready {
            self.ready = ready;
            info!(ready, "Media readiness signal changed");
            effects.push(SyncEffect::ReadinessChanged(ready));
        }
    }
}

fn settle(value: f64, target: f64, epsilon: f64) -> f64 {
    if (target - value).abs() < epsilon {
        target
    } else {
        value
    }
}
