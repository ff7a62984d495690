//! Seekable media backed by a decoded image sequence.

use crate::frames::ProbedSequence;
use iced::widget::image::Handle;
use scrubreel_core::{MediaStatus, ReadyState, SyncError};
use std::path::PathBuf;

/// Fully decoded sequence, kept in the media cache across remounts.
#[derive(Debug, Clone)]
pub struct DecodedSequence {
    pub frames: Vec<Handle>,
    pub fps: f64,
}

/// Frame sequence being loaded or played.
///
/// Readiness climbs as decoding progresses: the listing gives metadata, the
/// first decoded frame gives data, and the last decoded frame makes the
/// sequence playable.
#[derive(Debug)]
pub struct FrameSequence {
    paths: Vec<PathBuf>,
    frames: Vec<Option<Handle>>,
    decoded: usize,
    fps: f64,
    current: usize,
    position: f64,
}

impl FrameSequence {
    pub fn from_probe(probe: ProbedSequence, fps: f64) -> Self {
        let mut frames = vec![None; probe.paths.len()];
        if let Some(first) = frames.first_mut() {
            *first = Some(probe.first);
        }
        Self {
            decoded: frames.iter().filter(|f| f.is_some()).count(),
            paths: probe.paths,
            frames,
            fps,
            current: 0,
            position: 0.0,
        }
    }

    pub fn from_decoded(sequence: DecodedSequence) -> Self {
        let frames: Vec<Option<Handle>> = sequence.frames.into_iter().map(Some).collect();
        Self {
            decoded: frames.len(),
            paths: Vec::new(),
            frames,
            fps: sequence.fps,
            current: 0,
            position: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn decoded(&self) -> usize {
        self.decoded
    }

    pub fn is_complete(&self) -> bool {
        !self.frames.is_empty() && self.decoded == self.frames.len()
    }

    pub fn duration(&self) -> f64 {
        if self.fps > 0.0 {
            self.frames.len() as f64 / self.fps
        } else {
            0.0
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        if self.frames.is_empty() {
            ReadyState::NotLoaded
        } else if self.is_complete() {
            ReadyState::Playable
        } else if self.frames[0].is_some() {
            ReadyState::DataLoaded
        } else {
            ReadyState::MetadataLoaded
        }
    }

    pub fn status(&self) -> MediaStatus {
        MediaStatus::new(self.ready_state(), Some(self.duration()))
    }

    /// Paths of the next `count` frames that still need decoding, starting at
    /// `start`.
    pub fn pending_paths(&self, start: usize, count: usize) -> Vec<PathBuf> {
        self.paths.iter().skip(start).take(count).cloned().collect()
    }

    pub fn store_batch(&mut self, start: usize, batch: Vec<Handle>) {
        for (slot, handle) in self.frames.iter_mut().skip(start).zip(batch) {
            if slot.is_none() {
                self.decoded += 1;
            }
            *slot = Some(handle);
        }
    }

    pub fn frame_index(&self, position: f64) -> usize {
        if self.frames.is_empty() || !position.is_finite() {
            return 0;
        }
        let idx = (position.max(0.0) * self.fps).floor() as usize;
        idx.min(self.frames.len() - 1)
    }

    /// Moves the playhead. Positions that land on a frame that is not decoded
    /// yet are rejected; the caller may retry later.
    pub fn seek(&mut self, position: f64) -> Result<usize, SyncError> {
        let idx = self.frame_index(position);
        match self.frames.get(idx) {
            Some(Some(_)) => {
                self.current = idx;
                self.position = position.clamp(0.0, self.duration());
                Ok(idx)
            }
            _ => Err(SyncError::SeekRejected { position }),
        }
    }

    /// Last accepted seek position, unquantized.
    pub fn current_time(&self) -> f64 {
        self.position
    }

    pub fn current_frame(&self) -> Option<&Handle> {
        self.frames.get(self.current).and_then(Option::as_ref)
    }

    /// Snapshot for the cache once every frame is decoded.
    pub fn to_decoded(&self) -> Option<DecodedSequence> {
        if !self.is_complete() {
            return None;
        }
        Some(DecodedSequence {
            frames: self.frames.iter().flatten().cloned().collect(),
            fps: self.fps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> Handle {
        Handle::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    fn probed(count: usize) -> ProbedSequence {
        ProbedSequence {
            paths: (0..count).map(|i| PathBuf::from(format!("{i}.png"))).collect(),
            width: 1,
            height: 1,
            first: pixel(),
        }
    }

    #[test]
    fn readiness_tracks_decoding_progress() {
        let mut seq = FrameSequence::from_probe(probed(4), 2.0);
        assert_eq!(seq.ready_state(), ReadyState::DataLoaded);
        assert_eq!(seq.status().duration, Some(2.0));
        assert!(seq.status().is_seekable());

        assert_eq!(seq.pending_paths(1, 10).len(), 3);
        seq.store_batch(1, vec![pixel(), pixel(), pixel()]);
        assert_eq!(seq.ready_state(), ReadyState::Playable);
        assert!(seq.to_decoded().is_some());
    }

    #[test]
    fn seeking_to_undecoded_frame_is_rejected() {
        let mut seq = FrameSequence::from_probe(probed(4), 2.0);
        assert_eq!(seq.seek(0.2), Ok(0));
        assert_eq!(
            seq.seek(1.2),
            Err(SyncError::SeekRejected { position: 1.2 })
        );
        assert_eq!(seq.current_time(), 0.2);

        seq.store_batch(2, vec![pixel()]);
        assert_eq!(seq.seek(1.2), Ok(2));
        assert_eq!(seq.current_time(), 1.2);
    }

    #[test]
    fn positions_clamp_to_last_frame() {
        let seq = FrameSequence::from_decoded(DecodedSequence {
            frames: vec![pixel(), pixel(), pixel()],
            fps: 30.0,
        });
        assert_eq!(seq.frame_index(99.0), 2);
        assert_eq!(seq.frame_index(-1.0), 0);
        assert_eq!(seq.frame_index(f64::NAN), 0);
        assert!(seq.is_complete());
    }
}
