use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Invalid config TOML")?;
    let config = AppConfig::from(tables);
    config
        .sync
        .validate()
        .map_err(|err| anyhow!("Invalid [sync] table: {err}"))?;
    if !(config.fps.is_finite() && config.fps > 0.0) {
        return Err(anyhow!("[media] fps must be positive, got {}", config.fps));
    }
    if !(config.region_viewports.is_finite() && config.region_viewports > 1.0) {
        return Err(anyhow!(
            "[layout] region_viewports must exceed 1.0, got {}",
            config.region_viewports
        ));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};
    use scrubreel_core::{ProgressWindow, SmoothingStrategy};

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").expect("parse empty");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_table() {
        let raw = r#"
            [media]
            frames_dir = "assets/hero"
            fps = 24.0

            [layout]
            theme = "day"
            region_viewports = 4.0

            [overlay]
            title = "Hello"
            show_status = false

            [sync]
            min_seek_delta_secs = 0.05

            [sync.progress_smoothing]
            kind = "fixed"
            factor = 0.2

            [sync.window]
            start = 0.0
            end = 0.5

            [platform]
            require_gesture = true

            [logging]
            log_level = "info"

            [keys]
            remount = "ctrl+r"
        "#;
        let config = parse_config(raw).expect("parse full config");
        assert_eq!(config.frames_dir.as_deref(), Some(Path::new("assets/hero")));
        assert_eq!(config.fps, 24.0);
        assert_eq!(config.theme, ThemeMode::Day);
        assert_eq!(config.region_viewports, 4.0);
        assert_eq!(config.title, "Hello");
        assert!(!config.show_status);
        assert_eq!(config.sync.min_seek_delta_secs, 0.05);
        assert_eq!(
            config.sync.progress_smoothing,
            SmoothingStrategy::Fixed { factor: 0.2 }
        );
        assert_eq!(config.sync.window, ProgressWindow::new(0.0, 0.5));
        assert!(config.require_gesture);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.key_remount, "ctrl+r");
        assert_eq!(config.key_quit, "q");
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(parse_config("[media]\nfps = 0.0").is_err());
        assert!(parse_config("[layout]\nregion_viewports = 1.0").is_err());
        assert!(parse_config("[sync]\ntime_smoothing = 1.5").is_err());
        assert!(parse_config("[sync\n").is_err());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = parse_config(include_str!("../../conf/config.toml")).expect("shipped config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/definitely/not/here.toml"));
        assert_eq!(config, AppConfig::default());
    }
}
