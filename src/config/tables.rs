use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use scrubreel_core::SyncConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    media: MediaConfig,
    #[serde(default)]
    layout: LayoutConfig,
    #[serde(default)]
    overlay: OverlayConfig,
    #[serde(default)]
    sync: SyncConfig,
    #[serde(default)]
    platform: PlatformConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            frames_dir: tables.media.frames_dir,
            poster: tables.media.poster,
            fps: tables.media.fps,
            decode_batch: tables.media.decode_batch,
            theme: tables.layout.theme,
            window_width: tables.layout.window_width,
            window_height: tables.layout.window_height,
            lead_in_viewports: tables.layout.lead_in_viewports,
            region_viewports: tables.layout.region_viewports,
            tail_viewports: tables.layout.tail_viewports,
            title: tables.overlay.title,
            subtitle: tables.overlay.subtitle,
            body: tables.overlay.body,
            show_status: tables.overlay.show_status,
            sync: tables.sync,
            require_gesture: tables.platform.require_gesture,
            log_level: tables.logging.log_level,
            key_remount: tables.keys.remount,
            key_quit: tables.keys.quit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MediaConfig {
    #[serde(default)]
    frames_dir: Option<PathBuf>,
    #[serde(default)]
    poster: Option<PathBuf>,
    #[serde(default = "defaults::default_fps")]
    fps: f64,
    #[serde(default = "defaults::default_decode_batch")]
    decode_batch: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        MediaConfig {
            frames_dir: None,
            poster: None,
            fps: defaults::default_fps(),
            decode_batch: defaults::default_decode_batch(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LayoutConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_lead_in_viewports")]
    lead_in_viewports: f32,
    #[serde(default = "defaults::default_region_viewports")]
    region_viewports: f32,
    #[serde(default = "defaults::default_tail_viewports")]
    tail_viewports: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            theme: ThemeMode::default(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            lead_in_viewports: defaults::default_lead_in_viewports(),
            region_viewports: defaults::default_region_viewports(),
            tail_viewports: defaults::default_tail_viewports(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct OverlayConfig {
    #[serde(default = "defaults::default_title")]
    title: String,
    #[serde(default = "defaults::default_subtitle")]
    subtitle: String,
    #[serde(default = "defaults::default_body")]
    body: String,
    #[serde(default = "defaults::default_show_status")]
    show_status: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            title: defaults::default_title(),
            subtitle: defaults::default_subtitle(),
            body: defaults::default_body(),
            show_status: defaults::default_show_status(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PlatformConfig {
    #[serde(default)]
    require_gesture: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_remount")]
    remount: String,
    #[serde(default = "defaults::default_key_quit")]
    quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            remount: defaults::default_key_remount(),
            quit: defaults::default_key_quit(),
        }
    }
}
