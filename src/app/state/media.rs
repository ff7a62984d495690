use crate::cancellation::CancellationToken;
use crate::media::FrameSequence;
use iced::widget::image::Handle;

/// Frame loading model.
pub struct MediaState {
    pub(in crate::app) sequence: Option<FrameSequence>,
    /// Bumped on every new load; results tagged with an older value are stale.
    pub(in crate::app) generation: u64,
    pub(in crate::app) cancel: CancellationToken,
    pub(in crate::app) poster: Option<Handle>,
    pub(in crate::app) error: Option<String>,
}

impl MediaState {
    pub(in crate::app) fn new() -> Self {
        MediaState {
            sequence: None,
            generation: 0,
            cancel: CancellationToken::new(),
            poster: None,
            error: None,
        }
    }

    /// Starts a fresh load and returns its generation.
    pub(in crate::app) fn begin_load(&mut self) -> u64 {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.generation += 1;
        self.sequence = None;
        self.error = None;
        self.generation
    }

    /// Drops the sequence. Loading that has not finished is cancelled.
    pub(in crate::app) fn release(&mut self) {
        self.cancel.cancel();
        self.generation += 1;
        self.sequence = None;
    }
}
