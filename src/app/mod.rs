mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::{AppConfig, ThemeMode};
use iced::{Size, Theme, window};
use scrubreel_core::ScrollSyncPlayer;
use std::path::PathBuf;

/// Helper to launch the preview window for a frames directory.
pub fn run_app(
    config: AppConfig,
    frames_dir: PathBuf,
    player: ScrollSyncPlayer,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("scrubreel", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, frames_dir, player))
}
