//! WAV file reading and writing.
//!
//! The equalizer's file path works on interleaved stereo buffers, so the
//! readers here always hand back `[L0, R0, L1, R1, ...]`: mono files are
//! duplicated to both channels, files with more than two channels keep the
//! first two.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32; 32 is IEEE float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as interleaved stereo f32 samples along with its spec.
///
/// Mono input is duplicated to both channels; input with more than two
/// channels keeps the first two. The returned spec reflects the file as it
/// was on disk.
pub fn read_wav_interleaved<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;

    let raw: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let interleaved = match channels {
        0 => Vec::new(),
        1 => {
            let mut out = Vec::with_capacity(raw.len() * 2);
            for &sample in &raw {
                out.push(sample);
                out.push(sample);
            }
            out
        }
        2 => raw,
        _ => {
            let mut out = Vec::with_capacity(raw.len() / channels * 2);
            for frame in raw.chunks(channels) {
                out.push(frame[0]);
                out.push(frame.get(1).copied().unwrap_or(frame[0]));
            }
            out
        }
    };

    Ok((interleaved, spec))
}

/// Write interleaved stereo samples to a WAV file.
///
/// The spec's channel count is forced to 2; `bits_per_sample` selects float
/// (32) or integer PCM output.
pub fn write_wav_interleaved<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    spec: WavSpec,
) -> Result<()> {
    let mut stereo_spec = spec;
    stereo_spec.channels = 2;

    let mut writer = WavWriter::create(path, hound::WavSpec::from(stereo_spec))?;

    if stereo_spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (stereo_spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f32> = (0..2000).map(|i| (i as f32 / 500.0).sin() * 0.8).collect();
        let spec = WavSpec::default();

        let file = NamedTempFile::new().unwrap();
        write_wav_interleaved(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_interleaved(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 48000);
        assert_eq!(loaded_spec.channels, 2);
        assert_eq!(loaded.len(), samples.len());

        for (a, b) in samples.iter().zip(loaded.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_i16() {
        let samples: Vec<f32> = (0..2000).map(|i| (i as f32 / 500.0).sin() * 0.9).collect();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav_interleaved(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_interleaved(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        assert_eq!(loaded.len(), samples.len());

        // 16-bit has less precision
        for (a, b) in samples.iter().zip(loaded.iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_mono_is_duplicated_to_stereo() {
        let mono: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let file = NamedTempFile::new().unwrap();
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        for &s in &mono {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let (interleaved, loaded_spec) = read_wav_interleaved(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 1);
        assert_eq!(interleaved.len(), mono.len() * 2);
        for (i, &s) in mono.iter().enumerate() {
            assert_eq!(interleaved[i * 2], s);
            assert_eq!(interleaved[i * 2 + 1], s);
        }
    }
}
