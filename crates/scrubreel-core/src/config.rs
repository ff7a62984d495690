//! Tuning for the synchronizer.
//!
//! Deserializable from a TOML `[sync]` table; every field has a default so a
//! partial table still yields a usable configuration.

use crate::error::{Result, SyncError};
use crate::geometry::ProgressWindow;
use crate::smoothing::{SmoothingStrategy, is_valid_factor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub progress_smoothing: SmoothingStrategy,
    #[serde(default = "default_time_smoothing")]
    pub time_smoothing: f64,
    #[serde(default = "default_min_seek_delta_secs")]
    pub min_seek_delta_secs: f64,
    #[serde(default = "default_min_seek_interval_ms")]
    pub min_seek_interval_ms: f64,
    #[serde(default = "default_settle_epsilon")]
    pub settle_epsilon: f64,
    #[serde(default)]
    pub window: ProgressWindow,
    #[serde(default = "default_auto_activate")]
    pub auto_activate: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            progress_smoothing: SmoothingStrategy::default(),
            time_smoothing: default_time_smoothing(),
            min_seek_delta_secs: default_min_seek_delta_secs(),
            min_seek_interval_ms: default_min_seek_interval_ms(),
            settle_epsilon: default_settle_epsilon(),
            window: ProgressWindow::default(),
            auto_activate: default_auto_activate(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        self.progress_smoothing
            .validate()
            .map_err(SyncError::InvalidConfig)?;
        if !is_valid_factor(self.time_smoothing) {
            return Err(SyncError::InvalidConfig(format!(
                "time_smoothing {} is outside (0, 1]",
                self.time_smoothing
            )));
        }
        if !self.min_seek_delta_secs.is_finite() || self.min_seek_delta_secs < 0.0 {
            return Err(SyncError::InvalidConfig(format!(
                "min_seek_delta_secs {} must be >= 0",
                self.min_seek_delta_secs
            )));
        }
        if !self.min_seek_interval_ms.is_finite() || self.min_seek_interval_ms < 0.0 {
            return Err(SyncError::InvalidConfig(format!(
                "min_seek_interval_ms {} must be >= 0",
                self.min_seek_interval_ms
            )));
        }
        if !self.settle_epsilon.is_finite() || self.settle_epsilon < 0.0 {
            return Err(SyncError::InvalidConfig(format!(
                "settle_epsilon {} must be >= 0",
                self.settle_epsilon
            )));
        }
        if !self.window.is_valid() {
            return Err(SyncError::InvalidConfig(format!(
                "progress window [{}, {}] must satisfy 0 <= start < end <= 1",
                self.window.start, self.window.end
            )));
        }
        Ok(())
    }
}

pub(crate) fn default_time_smoothing() -> f64 {
    0.25
}

pub(crate) fn default_min_seek_delta_secs() -> f64 {
    0.03
}

pub(crate) fn default_min_seek_interval_ms() -> f64 {
    16.0
}

pub(crate) fn default_settle_epsilon() -> f64 {
    0.0001
}

pub(crate) fn default_auto_activate() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_fills_defaults() {
        let config: SyncConfig = toml::from_str("time_smoothing = 0.5").expect("parse sync table");
        assert_eq!(config.time_smoothing, 0.5);
        assert_eq!(config.min_seek_delta_secs, 0.03);
        assert_eq!(config.progress_smoothing, SmoothingStrategy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_tagged_smoothing_strategy() {
        let raw = r#"
            [progress_smoothing]
            kind = "directional"
            forward = 0.3
            backward = 0.15

            [window]
            start = 0.6
            end = 1.0
        "#;
        let config: SyncConfig = toml::from_str(raw).expect("parse sync table");
        assert_eq!(
            config.progress_smoothing,
            SmoothingStrategy::Directional {
                forward: 0.3,
                backward: 0.15
            }
        );
        assert_eq!(config.window, ProgressWindow::new(0.6, 1.0));
    }

    #[test]
    fn rejects_invalid_values() {
        let config = SyncConfig {
            time_smoothing: 0.0,
            ..SyncConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SyncError::InvalidConfig(_))
        ));

        let config = SyncConfig {
            window: ProgressWindow::new(0.8, 0.2),
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
