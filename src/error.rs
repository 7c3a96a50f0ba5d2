//! Error types for mask building, clip loading and playback

use std::time::Duration;

use crate::sound::Cue;

/// Errors that abort a display call
#[derive(Debug, thiserror::Error)]
pub enum MotusError {
    /// The feedback counts do not fit in the text
    #[error("invalid argument: {ok} ok + {misplaced} misplaced exceeds text length {len}")]
    InvalidArgument {
        ok: usize,
        misplaced: usize,
        len: usize,
    },

    /// A sound clip could not be read or decoded
    #[error("failed to load {cue} clip: {reason}")]
    ClipLoad { cue: Cue, reason: String },

    /// Writing to the output stream failed
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Advisory playback failure. Never aborts a reveal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SoundError {
    #[error("{cue} clip did not finish within {timeout:?}")]
    Timeout { cue: Cue, timeout: Duration },

    #[error("failed to play {cue} clip: {reason}")]
    Playback { cue: Cue, reason: String },

    #[error("audio device unavailable: {0}")]
    Device(String),
}

pub type Result<T> = std::result::Result<T, MotusError>;
