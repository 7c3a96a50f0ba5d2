// Motus (lingo) style text display

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mask;
pub mod reveal;
pub mod sound;

use std::io;

pub use cli::Cli;
pub use config::Options;
pub use error::{MotusError, SoundError};
pub use logging::LogLevel;
pub use mask::{build_mask, Feedback, Mask};
pub use reveal::{Displayer, RevealOutcome, Tile};

use sound::{DirClipLoader, RodioCuePlayer};

/// Build a displayer over the default audio device from `opts`
pub fn displayer_from_options(opts: &Options) -> Displayer<RodioCuePlayer<DirClipLoader>> {
    let player = RodioCuePlayer::new(DirClipLoader::new(&opts.sound_dir, &opts.sound_ext));
    let displayer = if opts.muted {
        Displayer::muted(player)
    } else {
        Displayer::new(player, opts.timeout)
    };
    displayer.with_char_delay(opts.char_delay)
}

/// Display `text` on stdout with default options.
///
/// A sound failure is logged and otherwise ignored.
pub fn display_text(text: &str, ok_count: i64, misplaced_count: i64) -> error::Result<()> {
    let mut displayer = displayer_from_options(&Options::default());
    let mut out = io::stdout().lock();
    let outcome = displayer.display_text(&mut out, text, ok_count, misplaced_count)?;
    if let Some(e) = outcome.sound_error {
        tracing::warn!("sound disabled: {}", e);
    }
    Ok(())
}
