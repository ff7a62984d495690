use scrubreel_core::SyncError;

mod core;
mod media;
mod scroll;
mod sync;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    ProbeSequence { generation: u64 },
    DecodeBatch { generation: u64, start: usize },
    ResolvePrime(Result<(), SyncError>),
    Mount,
    Quit,
}
