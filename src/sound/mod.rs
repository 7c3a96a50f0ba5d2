//! Sound cues for the reveal
//!
//! # Architecture
//!
//! - `Cue` names the three clips a reveal can play
//! - `ClipLoader` turns a cue into a decoded in-memory `ClipBuffer`
//! - `ClipBank` loads the three clips once and keeps them
//! - `CuePlayer` is what the reveal engine drives: play a cue, wait for it
//!   to finish or time out
//! - `rodio_audio` provides the real `CuePlayer` on top of rodio/cpal

pub mod clips;
pub mod player;
pub mod rodio_audio;

pub use clips::{decode_clip, ClipBank, ClipBuffer, ClipLoader, Cue, DirClipLoader};
pub use player::CuePlayer;
pub use rodio_audio::RodioCuePlayer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let bank = ClipBank::new();
        assert!(!bank.is_loaded());
        let _loader = DirClipLoader::new("resources", "mp3");
        assert_eq!(Cue::ALL.len(), 3);
    }
}
