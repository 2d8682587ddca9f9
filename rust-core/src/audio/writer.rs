//! WAV encoding of filtered signals
//!
//! Encodes to an in-memory buffer so callers decide where (and whether) the
//! result is persisted.

use super::signal::Signal;
use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::{Cursor, Seek, Write};
use std::path::Path;

/// Output format: mono 32-bit IEEE float at the signal's own rate
fn wav_spec(signal: &Signal) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

fn write_samples<W: Write + Seek>(signal: &Signal, sink: W) -> Result<()> {
    let mut writer = WavWriter::new(sink, wav_spec(signal))?;
    for &sample in signal.samples() {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Encode a signal as WAV bytes
pub fn encode_wav(signal: &Signal) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::with_capacity(44 + signal.len() * 4));
    write_samples(signal, &mut buffer)?;
    Ok(buffer.into_inner())
}

/// Encode a signal straight to a file, replacing any existing file
pub fn write_wav<P: AsRef<Path>>(signal: &Signal, path: P) -> Result<()> {
    let path = path.as_ref();
    log::info!("Writing {} samples to {}", signal.len(), path.display());

    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_samples(signal, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::loader::decode_wav;

    #[test]
    fn test_encoded_bytes_decode_to_same_signal() {
        let signal = Signal::new(vec![0.0, 0.25, -0.5, 0.75, -1.0], 16000).unwrap();
        let bytes = encode_wav(&signal).unwrap();

        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let decoded = decode_wav(Cursor::new(bytes)).unwrap().to_mono().unwrap();
        assert_eq!(decoded.sample_rate(), 16000);
        assert_eq!(decoded.samples(), signal.samples());
    }

    #[test]
    fn test_write_wav_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        std::fs::write(&path, b"stale").unwrap();

        let signal = Signal::new(vec![0.1; 32], 8000).unwrap();
        write_wav(&signal, &path).unwrap();

        let clip = crate::audio::load_audio(&path).unwrap();
        assert_eq!(clip.frames(), 32);
    }
}
