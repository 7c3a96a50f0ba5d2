//! Cue player trait

use std::time::Duration;

use super::clips::Cue;
use crate::error::{Result, SoundError};

/// Plays sound cues for the reveal engine
pub trait CuePlayer {
    /// Make every cue playable. Called before each reveal that has sound
    /// enabled, so it must be cheap once done. Failure aborts the reveal.
    fn prepare(&mut self) -> Result<()>;

    /// Play `cue` and block until it finishes or `timeout` elapses.
    ///
    /// A sound still running at the deadline is left to finish on its own.
    fn play(&mut self, cue: Cue, timeout: Duration) -> std::result::Result<(), SoundError>;
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn prepare(&mut self) -> Result<()> {
        (**self).prepare()
    }

    fn play(&mut self, cue: Cue, timeout: Duration) -> std::result::Result<(), SoundError> {
        (**self).play(cue, timeout)
    }
}
