//! Character-by-character reveal, lingo style
//!
//! The text is first printed plain and the cursor sent back to the start of
//! the line. Each character is then redrawn on its feedback color, one at a
//! time, with the matching sound cue.
//!
//! Sound is best effort. The first cue that fails or overruns its timeout
//! mutes the displayer for good; the visual reveal always runs to the end.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::error::{Result, SoundError};
use crate::mask::{build_mask, Feedback, Mask};
use crate::sound::{Cue, CuePlayer};

/// Pause between two revealed characters
pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(50);

/// Glyph color
pub const FOREGROUND: Color = Color::White;

/// Sound and background bound to a feedback category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub cue: Cue,
    pub background: Color,
}

impl Tile {
    pub fn for_feedback(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Correct => Tile {
                cue: Cue::Ok,
                background: Color::Red,
            },
            Feedback::Misplaced => Tile {
                cue: Cue::OutOfPlace,
                background: Color::Yellow,
            },
            Feedback::Absent => Tile {
                cue: Cue::Miss,
                background: Color::Blue,
            },
        }
    }
}

/// Result of a completed reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOutcome {
    /// Whether sound is still on after this call
    pub sound_enabled: bool,
    /// Set when a cue failed during this call
    pub sound_error: Option<SoundError>,
}

/// Displays text as in the motus (lingo) game
pub struct Displayer<P> {
    player: P,
    timeout: Duration,
    char_delay: Duration,
    with_sound: bool,
}

impl<P: CuePlayer> Displayer<P> {
    /// A displayer that plays cues, waiting at most `timeout` for each
    pub fn new(player: P, timeout: Duration) -> Self {
        Self {
            player,
            timeout,
            char_delay: DEFAULT_CHAR_DELAY,
            with_sound: true,
        }
    }

    /// A displayer that never touches `player`.
    ///
    /// Clips are never loaded, so a muted reveal works without sound assets.
    pub fn muted(player: P) -> Self {
        Self {
            player,
            timeout: Duration::ZERO,
            char_delay: DEFAULT_CHAR_DELAY,
            with_sound: false,
        }
    }

    pub fn with_char_delay(mut self, char_delay: Duration) -> Self {
        self.char_delay = char_delay;
        self
    }

    pub fn is_muted(&self) -> bool {
        !self.with_sound
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn char_delay(&self) -> Duration {
        self.char_delay
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Build a mask for `text` and reveal it.
    ///
    /// Nothing is written if the counts are invalid or the clips fail to
    /// load.
    pub fn display_text<W: Write>(
        &mut self,
        out: &mut W,
        text: &str,
        ok_count: i64,
        misplaced_count: i64,
    ) -> Result<RevealOutcome> {
        let mask = build_mask(text, ok_count, misplaced_count)?;
        self.reveal(out, text, &mask)
    }

    /// Reveal `text` with the categories in `mask`.
    ///
    /// `mask` must have one entry per character of `text`.
    pub fn reveal<W: Write>(
        &mut self,
        out: &mut W,
        text: &str,
        mask: &Mask,
    ) -> Result<RevealOutcome> {
        debug_assert_eq!(mask.len(), text.chars().count());

        if text.is_empty() {
            return Ok(self.outcome(None));
        }

        if self.with_sound {
            self.player.prepare()?;
        }

        queue!(
            out,
            SetForegroundColor(FOREGROUND),
            Print(text),
            ResetColor,
            Print('\r')
        )?;
        out.flush()?;

        let mut sound_error = None;

        for (c, feedback) in text.chars().zip(mask.iter()) {
            let tile = Tile::for_feedback(feedback);

            if self.with_sound {
                if let Err(e) = self.player.play(tile.cue, self.timeout) {
                    tracing::warn!("disabling sound: {}", e);
                    self.with_sound = false;
                    sound_error = Some(e);
                }
            }

            queue!(
                out,
                SetForegroundColor(FOREGROUND),
                SetBackgroundColor(tile.background),
                Print(c),
                ResetColor
            )?;
            out.flush()?;

            if !self.char_delay.is_zero() {
                thread::sleep(self.char_delay);
            }
        }

        queue!(out, Print('\n'))?;
        out.flush()?;

        Ok(self.outcome(sound_error))
    }

    fn outcome(&self, sound_error: Option<SoundError>) -> RevealOutcome {
        RevealOutcome {
            sound_enabled: self.with_sound,
            sound_error,
        }
    }
}
