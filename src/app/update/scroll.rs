use super::super::state::App;
use super::Effect;
use scrubreel_core::{FrameInput, SyncEvent};
use std::time::Instant;
use tracing::trace;

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset: f32,
        viewport_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.layout.scroll_offset = offset;
        if viewport_height.is_finite() && viewport_height > 0.0 {
            self.layout.viewport_height = viewport_height;
        }
        trace!(offset, viewport_height, "Scrolled");
        if self.host.scroll_attached {
            self.feed(
                SyncEvent::Scrolled {
                    offset: offset as f64,
                },
                effects,
            );
        }
    }

    /// Delivers one animation frame, measured the way a browser host would
    /// measure it: region geometry at this instant and the media's position.
    pub(super) fn handle_frame(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if !self.host.frame_pending {
            return;
        }
        self.host.frame_pending = false;
        let input = FrameInput {
            timestamp_ms: self.elapsed_ms(now),
            geometry: self
                .host
                .mounted
                .then(|| self.layout.region(&self.config)),
            media_time: self
                .media
                .sequence
                .as_ref()
                .map(|sequence| sequence.current_time()),
        };
        self.feed(SyncEvent::Frame(input), effects);
    }
}

#[cfg(test)]
mod tests {
    use crate::app::messages::Message;
    use crate::app::state::App;
    use crate::config::AppConfig;
    use crate::frames::ProbedSequence;
    use iced::widget::image::Handle;
    use scrubreel_core::ScrollSyncPlayer;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn mounted_app(frames: usize) -> App {
        let config = AppConfig {
            window_height: 1000.0,
            ..AppConfig::default()
        };
        let player = ScrollSyncPlayer::new(config.sync.clone()).expect("valid sync config");
        let mut app = App::new(config, PathBuf::from("frames"), player);
        app.reduce(Message::Mount);
        let pixel = || Handle::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let effects = app.reduce(Message::SequenceProbed {
            generation: 1,
            result: Ok(ProbedSequence {
                paths: (0..frames).map(|i| PathBuf::from(format!("{i}.png"))).collect(),
                width: 1,
                height: 1,
                first: pixel(),
            }),
        });
        for effect in effects {
            if let super::Effect::ResolvePrime(result) = effect {
                app.reduce(Message::PrimeResolved(result));
            }
        }
        app.reduce(Message::FramesDecoded {
            generation: 1,
            start: 1,
            result: Ok((1..frames).map(|_| pixel()).collect()),
        });
        app
    }

    #[test]
    fn scrolling_drives_the_playhead() {
        let mut app = mounted_app(60);
        assert!(app.host.ready);
        app.reduce(Message::Scrolled {
            offset: 2000.0,
            viewport_height: 1000.0,
        });

        let start = Instant::now();
        for frame in 1..=240 {
            app.reduce(Message::Frame(start + Duration::from_millis(frame * 17)));
        }
        let sequence = app.media.sequence.as_ref().expect("sequence");
        assert!((sequence.current_time() - 1.0).abs() <= 0.03 + 1e-9);
        assert!(app.host.frame_pending);
    }

    #[test]
    fn frames_without_a_pending_request_are_ignored() {
        let mut app = mounted_app(10);
        app.host.frame_pending = false;
        let effects = app.reduce(Message::Frame(Instant::now()));
        assert!(effects.is_empty());
        assert!(!app.host.frame_pending);
    }
}
