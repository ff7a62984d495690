use super::super::state::App;
use super::Effect;
use scrubreel_core::{SyncEffect, SyncError, SyncEvent};
use tracing::{debug, info};

impl App {
    /// Hands an event to the player and executes whatever it asks for.
    pub(super) fn feed(&mut self, event: SyncEvent, effects: &mut Vec<Effect>) {
        let sync_effects = self.player.handle(event);
        self.apply_sync(sync_effects, effects);
    }

    pub(super) fn apply_sync(&mut self, sync_effects: Vec<SyncEffect>, effects: &mut Vec<Effect>) {
        let mut follow_ups = Vec::new();
        for effect in sync_effects {
            match effect {
                SyncEffect::AttachScroll => self.host.scroll_attached = true,
                SyncEffect::DetachScroll => self.host.scroll_attached = false,
                SyncEffect::AttachMediaEvents => self.host.media_attached = true,
                SyncEffect::DetachMediaEvents => self.host.media_attached = false,
                SyncEffect::AttachGestures => self.host.gestures_attached = true,
                SyncEffect::DetachGestures => self.host.gestures_attached = false,
                SyncEffect::RequestFrame => self.host.frame_pending = true,
                SyncEffect::CancelFrame => self.host.frame_pending = false,
                SyncEffect::Prime => effects.push(Effect::ResolvePrime(self.prime())),
                SyncEffect::Seek(position) => {
                    let Some(sequence) = self.media.sequence.as_mut() else {
                        follow_ups.push(SyncEvent::SeekRejected { position });
                        continue;
                    };
                    if let Err(err) = sequence.seek(position) {
                        debug!(error = %err, "Frame not decoded yet");
                        follow_ups.push(SyncEvent::SeekRejected { position });
                    }
                }
                SyncEffect::ReadinessChanged(ready) => {
                    info!(ready, "Scrub section readiness changed");
                    self.host.ready = ready;
                }
            }
        }
        for event in follow_ups {
            self.feed(event, effects);
        }
    }

    /// Warm-up for the frame sequence: park on the first frame. With
    /// `require_gesture` set this only succeeds while a click or touch is
    /// being handled.
    fn prime(&mut self) -> Result<(), SyncError> {
        if self.config.require_gesture && !self.host.in_gesture {
            return Err(SyncError::ActivationDenied(
                "playback requires a user gesture".to_string(),
            ));
        }
        let sequence = self
            .media
            .sequence
            .as_mut()
            .ok_or_else(|| SyncError::PlaybackUnavailable("no frames loaded".to_string()))?;
        sequence
            .seek(0.0)
            .map_err(|err| SyncError::ActivationDenied(err.to_string()))?;
        Ok(())
    }
}
