//! Audio file decoding with hound
//!
//! Produces a multi-channel clip; the pipeline collapses it to a mono `Signal`

use super::signal::Signal;
use crate::error::{Result, WorkbenchError};
use hound::{SampleFormat, WavReader};
use ndarray::{Array2, Axis};
use std::io::Read;
use std::path::Path;

/// Decoded audio, one row per channel
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Shape `(channels, frames)`
    data: Array2<f64>,
    sample_rate: u32,
}

impl AudioClip {
    /// Wrap already-decoded channel data
    ///
    /// # Arguments
    /// * `data` - Samples with shape `(channels, frames)`
    /// * `sample_rate` - Sample rate in Hz
    pub fn from_channels(data: Array2<f64>, sample_rate: u32) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(WorkbenchError::InvalidSignal(format!(
                "audio has shape {:?}, expected at least one channel and one frame",
                data.dim()
            )));
        }
        if sample_rate == 0 {
            return Err(WorkbenchError::InvalidSignal(
                "sample rate must be greater than 0 Hz".into(),
            ));
        }

        Ok(Self { data, sample_rate })
    }

    pub fn channels(&self) -> usize {
        self.data.nrows()
    }

    pub fn frames(&self) -> usize {
        self.data.ncols()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Collapse to mono by averaging channels sample by sample
    ///
    /// Lossy: the per-channel content cannot be recovered afterwards.
    pub fn to_mono(&self) -> Result<Signal> {
        let samples = if self.channels() == 1 {
            self.data.row(0).to_vec()
        } else {
            log::warn!(
                "Downmixing {} channels to mono by averaging",
                self.channels()
            );
            self.data
                .mean_axis(Axis(0))
                .ok_or_else(|| WorkbenchError::InvalidSignal("no channels to average".into()))?
                .to_vec()
        };

        Signal::new(samples, self.sample_rate)
    }
}

/// Decode a WAV file from disk
pub fn load_audio<P: AsRef<Path>>(path: P) -> Result<AudioClip> {
    let path = path.as_ref();
    log::info!("Loading audio from {}", path.display());

    let reader = WavReader::open(path)?;
    decode(reader)
}

/// Decode a WAV stream (e.g. bytes held in memory)
pub fn decode_wav<R: Read>(source: R) -> Result<AudioClip> {
    let reader = WavReader::new(source)?;
    decode(reader)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<AudioClip> {
    let spec = reader.spec();
    let channels = spec.channels as usize;

    // Integer PCM is scaled to [-1, 1); float passes through
    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let frames = interleaved.len() / channels.max(1);
    log::debug!(
        "Decoded {} frames x {} channels at {} Hz ({}-bit {:?})",
        frames,
        channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    let data = Array2::from_shape_fn((channels, frames), |(c, f)| interleaved[f * channels + c]);
    AudioClip::from_channels(data, spec.sample_rate)
}
