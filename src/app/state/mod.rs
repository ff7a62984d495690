mod constants;
mod host;
mod layout;
mod media;
mod overlay;

use crate::config::AppConfig;
use crate::media::DecodedSequence;
use iced::Task;
use scrubreel_core::{MediaCache, ScrollSyncPlayer};
use std::path::PathBuf;
use std::time::Instant;

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use host::HostState;
pub(in crate::app) use layout::LayoutState;
pub(in crate::app) use media::MediaState;
pub(in crate::app) use overlay::{OverlayFrame, OverlayTracks};

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) frames_dir: PathBuf,
    pub(super) player: ScrollSyncPlayer,
    pub(super) cache: MediaCache<DecodedSequence>,
    pub(super) media: MediaState,
    pub(super) host: HostState,
    pub(super) layout: LayoutState,
    pub(super) overlay: OverlayTracks,
    pub(super) clock: Instant,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        frames_dir: PathBuf,
        player: ScrollSyncPlayer,
    ) -> (App, Task<Message>) {
        let app = App::new(config, frames_dir, player);
        let mut tasks = vec![Task::done(Message::Mount)];
        if let Some(poster) = app.config.poster.clone() {
            tasks.push(app.load_poster(poster));
        }
        (app, Task::batch(tasks))
    }

    pub(super) fn new(config: AppConfig, frames_dir: PathBuf, player: ScrollSyncPlayer) -> App {
        App {
            layout: LayoutState::new(&config),
            config,
            frames_dir,
            player,
            cache: MediaCache::new(),
            media: MediaState::new(),
            host: HostState::default(),
            overlay: OverlayTracks::default(),
            clock: Instant::now(),
        }
    }

    /// Cache key for the mounted sequence.
    pub(super) fn media_key(&self) -> String {
        self.frames_dir.display().to_string()
    }

    pub(super) fn overlay_frame(&self) -> OverlayFrame {
        self.overlay.sample(self.player.status().progress)
    }

    pub(super) fn elapsed_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.clock).as_secs_f64() * 1000.0
    }
}
