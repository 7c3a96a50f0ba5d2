//! Rodio-based cue player
//!
//! Clips are appended to a fresh `Sink` followed by an `EmptyCallback` that
//! signals a channel once the clip has been consumed. The caller waits on
//! that channel with a deadline. On timeout the sink is left detached so the
//! in-flight sound runs out on its own.
//!
//! The output stream is opened on first play, at the sample rate of the
//! first loaded clip when the default device supports it.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait};
use rodio::source::EmptyCallback;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use super::clips::{ClipBank, ClipLoader, Cue};
use super::player::CuePlayer;
use crate::error::{Result, SoundError};

/// Cue player backed by the default audio output device.
///
/// Not `Send`: rodio's `OutputStream` must stay on the thread that opened it.
pub struct RodioCuePlayer<L> {
    loader: L,
    bank: ClipBank,
    /// Keeps the device open; dropping it silences every sink.
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl<L: ClipLoader> RodioCuePlayer<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            bank: ClipBank::new(),
            output: None,
        }
    }

    pub fn bank(&self) -> &ClipBank {
        &self.bank
    }

    fn output_handle(&mut self) -> std::result::Result<&OutputStreamHandle, SoundError> {
        if self.output.is_none() {
            self.output = Some(open_output(self.bank.sample_rate())?);
        }
        match self.output {
            Some((_, ref handle)) => Ok(handle),
            None => Err(SoundError::Device("output stream not open".to_string())),
        }
    }
}

impl<L: ClipLoader> CuePlayer for RodioCuePlayer<L> {
    fn prepare(&mut self) -> Result<()> {
        self.bank.ensure_loaded(&self.loader)
    }

    fn play(&mut self, cue: Cue, timeout: Duration) -> std::result::Result<(), SoundError> {
        let source = match self.bank.get(cue) {
            Some(clip) => clip.to_source(),
            None => {
                return Err(SoundError::Playback {
                    cue,
                    reason: "clip not loaded".to_string(),
                })
            }
        };

        let handle = self.output_handle()?;
        let sink = Sink::try_new(handle).map_err(|e| SoundError::Playback {
            cue,
            reason: e.to_string(),
        })?;

        let (done_tx, done_rx) = mpsc::channel();
        sink.append(source);
        sink.append(EmptyCallback::<i16>::new(Box::new(move || {
            let _ = done_tx.send(());
        })));
        sink.detach();

        wait_done(&done_rx, cue, timeout)
    }
}

/// Block until the completion signal for `cue` arrives or `timeout` elapses
fn wait_done(
    done: &Receiver<()>,
    cue: Cue,
    timeout: Duration,
) -> std::result::Result<(), SoundError> {
    match done.recv_timeout(timeout) {
        Ok(()) => Ok(()),
        Err(RecvTimeoutError::Timeout) => {
            tracing::debug!("{} clip still playing after {:?}", cue, timeout);
            Err(SoundError::Timeout { cue, timeout })
        }
        Err(RecvTimeoutError::Disconnected) => Err(SoundError::Playback {
            cue,
            reason: "sink dropped before completion".to_string(),
        }),
    }
}

fn open_output(
    sample_rate: Option<u32>,
) -> std::result::Result<(OutputStream, OutputStreamHandle), SoundError> {
    if let Some(rate) = sample_rate {
        let host = cpal::default_host();
        if let Some(device) = host.default_output_device() {
            if let Some(config) = config_for_rate(&device, rate) {
                match OutputStream::try_from_device_config(&device, config) {
                    Ok(output) => {
                        tracing::info!("audio output opened at {} Hz", rate);
                        return Ok(output);
                    }
                    Err(e) => tracing::debug!("output at {} Hz refused: {}", rate, e),
                }
            }
        }
    }

    let output = OutputStream::try_default().map_err(|e| SoundError::Device(e.to_string()))?;
    tracing::info!("audio output opened with device defaults");
    Ok(output)
}

fn config_for_rate(device: &cpal::Device, rate: u32) -> Option<cpal::SupportedStreamConfig> {
    let mut configs = device.supported_output_configs().ok()?;
    configs
        .find(|range| range.min_sample_rate().0 <= rate && rate <= range.max_sample_rate().0)
        .map(|range| range.with_sample_rate(cpal::SampleRate(rate)))
}
