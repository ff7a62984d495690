use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use scrubreel_core::SyncEvent;
use tracing::{debug, info, warn};

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::Mount => self.handle_mount(&mut effects),
            Message::Remount => self.handle_remount(&mut effects),
            Message::Quit => effects.push(Effect::Quit),
            Message::SequenceProbed { generation, result } => {
                self.handle_sequence_probed(generation, result, &mut effects)
            }
            Message::FramesDecoded {
                generation,
                start,
                result,
            } => self.handle_frames_decoded(generation, start, result, &mut effects),
            Message::PosterLoaded(result) => self.handle_poster_loaded(result),
            Message::Scrolled {
                offset,
                viewport_height,
            } => self.handle_scrolled(offset, viewport_height, &mut effects),
            Message::Frame(now) => self.handle_frame(now, &mut effects),
            Message::PrimeResolved(result) => {
                self.feed(SyncEvent::PrimeResolved(result), &mut effects)
            }
            Message::Gesture => self.handle_gesture(&mut effects),
            Message::WindowResized { height } => self.layout.viewport_height = height,
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
        }

        effects
    }

    fn handle_mount(&mut self, effects: &mut Vec<Effect>) {
        if self.host.mounted {
            debug!("Section already mounted");
            return;
        }
        let key = self.media_key();
        let source = self.cache.source_for(&key);
        info!(
            key = %key,
            prewarmed = source.is_prewarmed(),
            "Mounting scrub section"
        );
        self.attach_source(source, effects);

        let region = self.layout.region(&self.config);
        match self.player.start(Some(region)) {
            Ok(sync_effects) => {
                self.host.mounted = true;
                self.apply_sync(sync_effects, effects);
            }
            Err(err) => {
                warn!(error = %err, "Failed to start scroll sync");
                return;
            }
        }
        let offset = self.layout.scroll_offset as f64;
        self.feed(SyncEvent::Scrolled { offset }, effects);
        self.publish_media_status(effects);
    }

    /// Unmount then mount again on the next update, the way a page
    /// navigation would tear the section down and rebuild it.
    fn handle_remount(&mut self, effects: &mut Vec<Effect>) {
        self.unmount(effects);
        effects.push(Effect::Mount);
    }

    pub(in crate::app) fn unmount(&mut self, effects: &mut Vec<Effect>) {
        if !self.host.mounted {
            return;
        }
        let sync_effects = self.player.stop();
        self.apply_sync(sync_effects, effects);
        self.host.mounted = false;

        let key = self.media_key();
        let complete = self
            .media
            .sequence
            .as_ref()
            .map(|sequence| sequence.is_complete())
            .unwrap_or(false);
        if !complete {
            // A half-loaded sequence is not worth keeping; the next mount reloads it.
            self.cache.evict(&key);
        }
        self.media.release();
        info!(
            key = %key,
            cached = complete,
            released = !self.host.has_live_work(),
            "Unmounted scrub section"
        );
    }

    fn handle_gesture(&mut self, effects: &mut Vec<Effect>) {
        if !self.host.gestures_attached {
            return;
        }
        self.host.in_gesture = true;
        self.feed(SyncEvent::UserGesture, effects);
        self.host.in_gesture = false;
    }
}
