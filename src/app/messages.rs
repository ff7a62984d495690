use crate::frames::ProbedSequence;
use iced::keyboard::{Key, Modifiers};
use iced::widget::image::Handle;
use scrubreel_core::SyncError;
use std::time::Instant;

/// Messages emitted by the UI and background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    Mount,
    Remount,
    Quit,
    SequenceProbed {
        generation: u64,
        result: Result<ProbedSequence, String>,
    },
    FramesDecoded {
        generation: u64,
        start: usize,
        result: Result<Vec<Handle>, String>,
    },
    PosterLoaded(Result<Handle, String>),
    Scrolled {
        offset: f32,
        viewport_height: f32,
    },
    Frame(Instant),
    PrimeResolved(Result<(), SyncError>),
    /// Pointer press or touch anywhere in the window.
    Gesture,
    WindowResized {
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
}
