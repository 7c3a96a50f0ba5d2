//! Clip loading and caching
//!
//! Clips are decoded once into memory. The first clip's sample rate is the
//! one the audio device is opened with.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, Source};

use crate::error::{MotusError, Result};

/// One of the three sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Ok,
    OutOfPlace,
    Miss,
}

impl Cue {
    /// Load order. `Ok` comes first and fixes the device sample rate.
    pub const ALL: [Cue; 3] = [Cue::Ok, Cue::OutOfPlace, Cue::Miss];

    /// Logical name
    pub fn name(self) -> &'static str {
        match self {
            Cue::Ok => "ok",
            Cue::OutOfPlace => "out-of-place",
            Cue::Miss => "miss",
        }
    }

    /// Asset file stem
    pub fn file_stem(self) -> &'static str {
        match self {
            Cue::Ok => "ok",
            Cue::OutOfPlace => "oop",
            Cue::Miss => "ko",
        }
    }

    fn index(self) -> usize {
        match self {
            Cue::Ok => 0,
            Cue::OutOfPlace => 1,
            Cue::Miss => 2,
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded interleaved PCM for one clip
#[derive(Debug, Clone, PartialEq)]
pub struct ClipBuffer {
    channels: u16,
    sample_rate: u32,
    samples: Arc<[i16]>,
}

impl ClipBuffer {
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<i16>) -> Self {
        Self {
            channels,
            sample_rate,
            samples: samples.into(),
        }
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length
    pub fn duration(&self) -> Duration {
        if self.channels == 0 || self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as u64 / u64::from(self.channels);
        Duration::from_micros(frames * 1_000_000 / u64::from(self.sample_rate))
    }

    /// A fresh source over the samples, one per play
    pub fn to_source(&self) -> SamplesBuffer<i16> {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples.to_vec())
    }
}

/// Decode a compressed clip (mp3, ogg vorbis or wav) into memory
pub fn decode_clip(cue: Cue, data: Vec<u8>) -> Result<ClipBuffer> {
    let decoder = Decoder::new(Cursor::new(data)).map_err(|e| MotusError::ClipLoad {
        cue,
        reason: e.to_string(),
    })?;

    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let clip = ClipBuffer::new(channels, sample_rate, decoder.collect());

    if clip.is_empty() {
        return Err(MotusError::ClipLoad {
            cue,
            reason: "no audio data".to_string(),
        });
    }

    Ok(clip)
}

/// Source of decoded clips
pub trait ClipLoader {
    fn load_clip(&self, cue: Cue) -> Result<ClipBuffer>;
}

/// Loads `<dir>/<stem>.<ext>` for each cue
#[derive(Debug, Clone)]
pub struct DirClipLoader {
    dir: PathBuf,
    extension: String,
}

impl DirClipLoader {
    pub fn new<P: AsRef<Path>>(dir: P, extension: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn path_for(&self, cue: Cue) -> PathBuf {
        self.dir
            .join(cue.file_stem())
            .with_extension(&self.extension)
    }
}

impl ClipLoader for DirClipLoader {
    fn load_clip(&self, cue: Cue) -> Result<ClipBuffer> {
        let path = self.path_for(cue);
        let data = fs::read(&path).map_err(|e| MotusError::ClipLoad {
            cue,
            reason: format!("{}: {}", path.display(), e),
        })?;
        tracing::debug!("loaded {} ({} bytes) from {}", cue, data.len(), path.display());
        decode_clip(cue, data)
    }
}

/// The three clips, loaded once
#[derive(Debug, Default)]
pub struct ClipBank {
    clips: Option<[ClipBuffer; 3]>,
}

impl ClipBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.clips.is_some()
    }

    /// Load every clip through `loader` unless already loaded.
    ///
    /// Nothing is kept if any clip fails, so a later call retries all three.
    pub fn ensure_loaded(&mut self, loader: &dyn ClipLoader) -> Result<()> {
        if self.clips.is_some() {
            return Ok(());
        }

        let ok = loader.load_clip(Cue::Ok)?;
        let oop = loader.load_clip(Cue::OutOfPlace)?;
        let miss = loader.load_clip(Cue::Miss)?;

        tracing::info!(
            "clips loaded: ok {:?}, out-of-place {:?}, miss {:?} at {} Hz",
            ok.duration(),
            oop.duration(),
            miss.duration(),
            ok.sample_rate()
        );

        self.clips = Some([ok, oop, miss]);
        Ok(())
    }

    pub fn get(&self, cue: Cue) -> Option<&ClipBuffer> {
        self.clips.as_ref().map(|clips| &clips[cue.index()])
    }

    /// Rate of the first clip, used to open the device
    pub fn sample_rate(&self) -> Option<u32> {
        self.get(Cue::Ok).map(ClipBuffer::sample_rate)
    }
}
