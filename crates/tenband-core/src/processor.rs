//! Buffer-level front end over the equalizer.
//!
//! [`AudioProcessor`] accepts the two buffer layouts a capture or playback
//! path hands out: interleaved stereo (`[L0, R0, L1, R1, ...]`) and separate
//! planar channels. Interleaved buffers are split into two reusable scratch
//! vectors, processed, and merged back in place.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::equalizer::{Equalizer, NUM_BANDS};

/// Sample rate the processor's equalizer starts at before
/// [`initialize`](AudioProcessor::initialize) is called.
const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Buffer-level audio processor owning one [`Equalizer`].
///
/// Control-surface calls are forwarded to the equalizer and work before
/// `initialize`; the `process_*` methods are no-ops until then. Scratch
/// buffers grow to the largest frame count seen and are never shrunk, so
/// the steady-state processing path does not allocate.
pub struct AudioProcessor {
    equalizer: Equalizer,
    sample_rate: f64,
    initialized: bool,
    left_scratch: Vec<f32>,
    right_scratch: Vec<f32>,
}

impl AudioProcessor {
    /// Creates a processor with an equalizer at the default 44.1 kHz,
    /// not yet initialized.
    pub fn new() -> Self {
        Self {
            equalizer: Equalizer::new(DEFAULT_SAMPLE_RATE),
            sample_rate: DEFAULT_SAMPLE_RATE,
            initialized: false,
            left_scratch: Vec::new(),
            right_scratch: Vec::new(),
        }
    }

    /// (Re)constructs the owned equalizer at the given sample rate and
    /// marks the processor initialized.
    pub fn initialize(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.equalizer = Equalizer::new(sample_rate);
        self.initialized = true;
    }

    /// Returns whether `initialize` has been called.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the nominal sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Processes an interleaved stereo buffer in place.
    ///
    /// Does nothing when the processor is uninitialized or the equalizer is
    /// bypassed. An odd trailing sample (a half frame) is left unprocessed;
    /// that is a caller bug, not an error.
    pub fn process_interleaved_stereo(&mut self, buffer: &mut [f32]) {
        if !self.initialized || !self.equalizer.is_enabled() {
            return;
        }

        let frames = buffer.len() / 2;
        if frames == 0 {
            return;
        }

        // Scratch grows monotonically; shrinking would allocate on a later
        // larger buffer mid-session.
        if self.left_scratch.len() < frames {
            self.left_scratch.resize(frames, 0.0);
            self.right_scratch.resize(frames, 0.0);
        }

        for i in 0..frames {
            self.left_scratch[i] = buffer[i * 2];
            self.right_scratch[i] = buffer[i * 2 + 1];
        }

        self.equalizer
            .process_stereo(&mut self.left_scratch[..frames], &mut self.right_scratch[..frames]);

        for i in 0..frames {
            buffer[i * 2] = self.left_scratch[i];
            buffer[i * 2 + 1] = self.right_scratch[i];
        }
    }

    /// Processes two planar channel buffers in place.
    ///
    /// Does nothing when the processor is uninitialized or the equalizer is
    /// bypassed.
    pub fn process_separate_channels(&mut self, left: &mut [f32], right: &mut [f32]) {
        if !self.initialized || !self.equalizer.is_enabled() {
            return;
        }
        self.equalizer.process_stereo(left, right);
    }

    /// Forwards to [`Equalizer::set_band_gain`].
    pub fn set_band_gain(&mut self, band: usize, gain_db: f64) {
        self.equalizer.set_band_gain(band, gain_db);
    }

    /// Forwards to [`Equalizer::band_gain`].
    pub fn band_gain(&self, band: usize) -> f64 {
        self.equalizer.band_gain(band)
    }

    /// Forwards to [`Equalizer::apply_preset`].
    pub fn apply_preset(&mut self, name: &str) {
        self.equalizer.apply_preset(name);
    }

    /// Forwards to [`Equalizer::reset`].
    pub fn reset_eq(&mut self) {
        self.equalizer.reset();
    }

    /// Forwards to [`Equalizer::set_enabled`].
    pub fn set_enabled(&mut self, enabled: bool) {
        self.equalizer.set_enabled(enabled);
    }

    /// Forwards to [`Equalizer::is_enabled`].
    pub fn is_enabled(&self) -> bool {
        self.equalizer.is_enabled()
    }

    /// Forwards to [`Equalizer::band_frequencies`].
    pub fn band_frequencies(&self) -> [f64; NUM_BANDS] {
        self.equalizer.band_frequencies()
    }
}

impl Default for AudioProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_process_is_noop() {
        let mut processor = AudioProcessor::new();
        processor.apply_preset("bass_boost");
        assert!(!processor.is_initialized());

        let mut buffer = [0.5f32, -0.5, 0.25, -0.25];
        processor.process_interleaved_stereo(&mut buffer);
        assert_eq!(buffer, [0.5, -0.5, 0.25, -0.25]);

        let mut left = [0.5f32, 0.25];
        let mut right = [-0.5f32, -0.25];
        processor.process_separate_channels(&mut left, &mut right);
        assert_eq!(left, [0.5, 0.25]);
        assert_eq!(right, [-0.5, -0.25]);
    }

    #[test]
    fn test_control_surface_works_before_initialize() {
        let mut processor = AudioProcessor::new();

        processor.set_band_gain(2, 6.0);
        assert_eq!(processor.band_gain(2), 6.0);
        assert!(processor.is_enabled());
        assert_eq!(processor.band_frequencies()[5], 1000.0);
    }

    #[test]
    fn test_initialize_replaces_equalizer() {
        let mut processor = AudioProcessor::new();
        processor.set_band_gain(0, 6.0);

        processor.initialize(48000.0);

        assert!(processor.is_initialized());
        assert_eq!(processor.sample_rate(), 48000.0);
        // A fresh equalizer: earlier gains are gone.
        assert_eq!(processor.band_gain(0), 0.0);
    }

    #[test]
    fn test_interleaved_matches_separate_channels() {
        let mut interleaved_proc = AudioProcessor::new();
        interleaved_proc.initialize(48000.0);
        interleaved_proc.apply_preset("rock");

        let mut planar_proc = AudioProcessor::new();
        planar_proc.initialize(48000.0);
        planar_proc.apply_preset("rock");

        let frames = 256;
        let mut left: Vec<f32> = (0..frames).map(|i| ((i % 17) as f32 - 8.0) / 10.0).collect();
        let mut right: Vec<f32> = (0..frames).map(|i| ((i % 23) as f32 - 11.0) / 12.0).collect();

        let mut interleaved: Vec<f32> = Vec::with_capacity(frames * 2);
        for i in 0..frames {
            interleaved.push(left[i]);
            interleaved.push(right[i]);
        }

        interleaved_proc.process_interleaved_stereo(&mut interleaved);
        planar_proc.process_separate_channels(&mut left, &mut right);

        for i in 0..frames {
            assert_eq!(interleaved[i * 2], left[i], "left frame {i}");
            assert_eq!(interleaved[i * 2 + 1], right[i], "right frame {i}");
        }
    }

    #[test]
    fn test_odd_sample_count_drops_trailing_sample() {
        let mut processor = AudioProcessor::new();
        processor.initialize(48000.0);
        processor.apply_preset("bass_boost");

        let mut buffer = [0.5f32, -0.5, 0.25, -0.25, 0.9];
        processor.process_interleaved_stereo(&mut buffer);

        // Two full frames processed, the dangling half frame untouched.
        assert_ne!(buffer[..4], [0.5, -0.5, 0.25, -0.25]);
        assert_eq!(buffer[4], 0.9);
    }

    #[test]
    fn test_bypass_leaves_interleaved_buffer_bitwise_unchanged() {
        let mut processor = AudioProcessor::new();
        processor.initialize(48000.0);
        processor.apply_preset("bass_boost");
        processor.set_enabled(false);

        let original = [0.5f32, -0.5, 0.25, -0.25];
        let mut buffer = original;
        processor.process_interleaved_stereo(&mut buffer);

        assert_eq!(buffer.map(f32::to_bits), original.map(f32::to_bits));
    }

    #[test]
    fn test_scratch_never_shrinks() {
        let mut processor = AudioProcessor::new();
        processor.initialize(48000.0);

        let mut large = vec![0.1f32; 4096];
        processor.process_interleaved_stereo(&mut large);
        let grown = processor.left_scratch.len();
        assert_eq!(grown, 2048);

        let mut small = vec![0.1f32; 64];
        processor.process_interleaved_stereo(&mut small);
        assert_eq!(processor.left_scratch.len(), grown);
        assert_eq!(processor.right_scratch.len(), grown);
    }

    #[test]
    fn test_reset_eq_forwards() {
        let mut processor = AudioProcessor::new();
        processor.initialize(48000.0);
        processor.apply_preset("dance");
        assert_ne!(processor.band_gain(0), 0.0);

        processor.reset_eq();
        for band in 0..NUM_BANDS {
            assert_eq!(processor.band_gain(band), 0.0);
        }
    }
}
