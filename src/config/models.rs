use scrubreel_core::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Flattened view of `conf/config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub frames_dir: Option<PathBuf>,
    pub poster: Option<PathBuf>,
    pub fps: f64,
    pub decode_batch: usize,
    pub theme: ThemeMode,
    pub window_width: f32,
    pub window_height: f32,
    pub lead_in_viewports: f32,
    pub region_viewports: f32,
    pub tail_viewports: f32,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub show_status: bool,
    pub sync: SyncConfig,
    pub require_gesture: bool,
    pub log_level: LogLevel,
    pub key_remount: String,
    pub key_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            frames_dir: None,
            poster: None,
            fps: crate::config::defaults::default_fps(),
            decode_batch: crate::config::defaults::default_decode_batch(),
            theme: ThemeMode::default(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            lead_in_viewports: crate::config::defaults::default_lead_in_viewports(),
            region_viewports: crate::config::defaults::default_region_viewports(),
            tail_viewports: crate::config::defaults::default_tail_viewports(),
            title: crate::config::defaults::default_title(),
            subtitle: crate::config::defaults::default_subtitle(),
            body: crate::config::defaults::default_body(),
            show_status: crate::config::defaults::default_show_status(),
            sync: SyncConfig::default(),
            require_gesture: false,
            log_level: crate::config::defaults::default_log_level(),
            key_remount: crate::config::defaults::default_key_remount(),
            key_quit: crate::config::defaults::default_key_quit(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    #[default]
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
