use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of the media resource is available, in loading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReadyState {
    #[default]
    NotLoaded,
    MetadataLoaded,
    DataLoaded,
    Playable,
}

impl ReadyState {
    /// Maps an `HTMLMediaElement.readyState` value.
    pub fn from_html(ready_state: u16) -> Self {
        match ready_state {
            0 => ReadyState::NotLoaded,
            1 => ReadyState::MetadataLoaded,
            2 => ReadyState::DataLoaded,
            _ => ReadyState::Playable,
        }
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReadyState::NotLoaded => "not-loaded",
            ReadyState::MetadataLoaded => "metadata-loaded",
            ReadyState::DataLoaded => "data-loaded",
            ReadyState::Playable => "playable",
        };
        write!(f, "{}", label)
    }
}

/// Readiness snapshot reported by the host whenever the media pipeline moves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaStatus {
    pub ready_state: ReadyState,
    /// Seconds; `None` until metadata is known.
    pub duration: Option<f64>,
}

impl MediaStatus {
    pub fn new(ready_state: ReadyState, duration: Option<f64>) -> Self {
        Self {
            ready_state,
            duration: duration.filter(|d| d.is_finite() && *d > 0.0),
        }
    }

    /// Fully buffered media, as handed out by a warm cache.
    pub fn playable(duration: f64) -> Self {
        Self::new(ReadyState::Playable, Some(duration))
    }

    pub fn has_metadata(&self) -> bool {
        self.ready_state >= ReadyState::MetadataLoaded && self.duration.is_some()
    }

    /// Enough data to render the frame at the current position.
    pub fn is_seekable(&self) -> bool {
        self.ready_state >= ReadyState::DataLoaded && self.duration.is_some()
    }
}

/// Where a host gets its media from.
///
/// Source selection (resolution, device class) happens before this point; the
/// synchronizer only ever sees one source.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource<H> {
    Url(String),
    Prewarmed(H),
}

impl<H> MediaSource<H> {
    pub fn is_prewarmed(&self) -> bool {
        matches!(self, MediaSource::Prewarmed(_))
    }
}
