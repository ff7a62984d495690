use super::super::state::App;
use super::Effect;
use crate::frames::ProbedSequence;
use crate::media::{DecodedSequence, FrameSequence};
use iced::widget::image::Handle;
use scrubreel_core::{MediaSource, MediaStatus, SyncEvent};
use tracing::{debug, info, warn};

impl App {
    /// Installs the media for a fresh mount: a cached sequence when one is
    /// ready, otherwise a new load of the frames directory.
    pub(super) fn attach_source(
        &mut self,
        source: MediaSource<DecodedSequence>,
        effects: &mut Vec<Effect>,
    ) {
        match source {
            MediaSource::Prewarmed(decoded) => {
                debug!(frames = decoded.frames.len(), "Using cached frame sequence");
                self.media.sequence = Some(FrameSequence::from_decoded(decoded));
                self.media.error = None;
            }
            MediaSource::Url(key) => {
                if self.cache.begin_loading(&key) {
                    let generation = self.media.begin_load();
                    effects.push(Effect::ProbeSequence { generation });
                } else {
                    debug!(key = %key, "Frame sequence load already in flight");
                }
            }
        }
    }

    /// Reports the current media readiness to the player, the way a media
    /// element fires its readiness events.
    pub(super) fn publish_media_status(&mut self, effects: &mut Vec<Effect>) {
        if !self.host.media_attached {
            return;
        }
        let status = self
            .media
            .sequence
            .as_ref()
            .map(FrameSequence::status)
            .unwrap_or_else(MediaStatus::default);
        self.feed(SyncEvent::MediaChanged(status), effects);
    }

    pub(super) fn handle_sequence_probed(
        &mut self,
        generation: u64,
        result: Result<ProbedSequence, String>,
        effects: &mut Vec<Effect>,
    ) {
        if generation != self.media.generation {
            debug!(generation, current = self.media.generation, "Dropping stale probe");
            return;
        }
        let key = self.media_key();
        match result {
            Ok(probe) => {
                let (width, height) = (probe.width, probe.height);
                let sequence = FrameSequence::from_probe(probe, self.config.fps);
                info!(
                    frames = sequence.len(),
                    width,
                    height,
                    duration = sequence.duration(),
                    "Frame sequence ready for scrubbing"
                );
                self.media.sequence = Some(sequence);
                self.publish_media_status(effects);
                self.after_frames_stored(generation, 1, effects);
            }
            Err(error) => {
                self.cache.fail(&key, error.clone());
                self.media.error = Some(error.clone());
                if self.host.media_attached {
                    self.feed(SyncEvent::MediaFailed(error), effects);
                }
            }
        }
    }

    pub(super) fn handle_frames_decoded(
        &mut self,
        generation: u64,
        start: usize,
        result: Result<Vec<Handle>, String>,
        effects: &mut Vec<Effect>,
    ) {
        if generation != self.media.generation {
            debug!(generation, start, "Dropping stale frame batch");
            return;
        }
        match result {
            Ok(batch) => {
                let next = start + batch.len();
                let Some(sequence) = self.media.sequence.as_mut() else {
                    return;
                };
                sequence.store_batch(start, batch);
                debug!(
                    decoded = sequence.decoded(),
                    total = sequence.len(),
                    "Stored frame batch"
                );
                self.publish_media_status(effects);
                self.after_frames_stored(generation, next, effects);
            }
            Err(error) => {
                warn!(start, %error, "Frame decoding failed");
                let key = self.media_key();
                self.cache.fail(&key, error.clone());
                self.media.error = Some(error.clone());
                if self.host.media_attached {
                    self.feed(SyncEvent::MediaFailed(error), effects);
                }
            }
        }
    }

    /// Queues the next batch, or caches the sequence once it is complete.
    fn after_frames_stored(&mut self, generation: u64, next: usize, effects: &mut Vec<Effect>) {
        let Some(sequence) = self.media.sequence.as_ref() else {
            return;
        };
        if let Some(decoded) = sequence.to_decoded() {
            let key = self.media_key();
            info!(key = %key, frames = decoded.frames.len(), "Frame sequence fully decoded");
            self.cache.complete(&key, decoded);
        } else if next < sequence.len() {
            effects.push(Effect::DecodeBatch {
                generation,
                start: next,
            });
        }
    }

    pub(super) fn handle_poster_loaded(&mut self, result: Result<Handle, String>) {
        match result {
            Ok(handle) => self.media.poster = Some(handle),
            Err(error) => warn!(%error, "Poster unavailable; using gradient placeholder"),
        }
    }
}
