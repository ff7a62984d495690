use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use crate::frames::{decode_batch, decode_frame, probe_sequence};
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::mouse;
use iced::touch;
use iced::window;
use std::path::PathBuf;
use tracing::{debug, info};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ProbeSequence { generation } => {
                let dir = self.frames_dir.clone();
                let cancel = self.media.cancel.clone();
                info!(dir = %dir.display(), generation, "Dispatching frame probe");
                Task::perform(
                    async move {
                        cancel
                            .check_cancelled("probe")
                            .and_then(|_| probe_sequence(&dir))
                            .map_err(|err| format!("{err:#}"))
                    },
                    move |result| Message::SequenceProbed { generation, result },
                )
            }
            Effect::DecodeBatch { generation, start } => {
                let Some(sequence) = self.media.sequence.as_ref() else {
                    return Task::none();
                };
                let paths = sequence.pending_paths(start, self.config.decode_batch.max(1));
                let cancel = self.media.cancel.clone();
                debug!(generation, start, count = paths.len(), "Dispatching frame decode");
                Task::perform(
                    async move { decode_batch(&paths, &cancel).map_err(|err| format!("{err:#}")) },
                    move |result| Message::FramesDecoded {
                        generation,
                        start,
                        result,
                    },
                )
            }
            Effect::ResolvePrime(result) => Task::done(Message::PrimeResolved(result)),
            Effect::Mount => Task::done(Message::Mount),
            Effect::Quit => {
                let mut ignored = Vec::new();
                self.unmount(&mut ignored);
                info!("Quitting");
                iced::exit()
            }
        }
    }

    pub(in crate::app) fn load_poster(&self, path: PathBuf) -> Task<Message> {
        Task::perform(
            async move {
                decode_frame(&path)
                    .map(|(handle, _, _)| handle)
                    .map_err(|err| format!("{err:#}"))
            },
            Message::PosterLoaded,
        )
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::ButtonPressed(_))
        | Event::Touch(touch::Event::FingerPressed { .. }) => return Some(Message::Gesture),
        _ => {}
    }
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
