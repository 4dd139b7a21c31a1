//! Ten-band stereo equalizer.
//!
//! One biquad per band per channel, applied as a cascade in ascending band
//! order. Band 0 is a low shelf, band 9 a high shelf, bands 1-8 are peaking
//! filters; Q is fixed at 1.0 for every band. The two channel cascades are
//! design-identical but keep independent state.

use crate::biquad::{Biquad, FilterShape};
use crate::math::hard_clip;
use crate::presets;

/// Number of equalizer bands.
pub const NUM_BANDS: usize = 10;

/// Band center/corner frequencies in Hz, in band order.
pub const BAND_FREQUENCIES: [f64; NUM_BANDS] = [
    31.0, 62.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

/// Per-band gain limit in dB; writes outside ±12 dB are clamped.
pub const GAIN_LIMIT_DB: f64 = 12.0;

/// Fixed quality factor for every band.
const BAND_Q: f64 = 1.0;

/// Ten-band stereo equalizer.
///
/// Control-plane calls (`set_band_gain`, `apply_preset`, `set_enabled`, ...)
/// mutate filter design; [`process_stereo`](Equalizer::process_stereo) runs
/// the audio. Out-of-range band indices and unknown preset names are silent
/// no-ops so a UI binding can drive this surface without error plumbing.
///
/// # Example
///
/// ```rust
/// use tenband_core::Equalizer;
///
/// let mut eq = Equalizer::new(48000.0);
/// eq.apply_preset("rock");
/// assert_eq!(eq.band_gain(0), 5.0);
///
/// let mut left = [0.1f32; 64];
/// let mut right = [0.1f32; 64];
/// eq.process_stereo(&mut left, &mut right);
/// ```
#[derive(Debug, Clone)]
pub struct Equalizer {
    left: [Biquad; NUM_BANDS],
    right: [Biquad; NUM_BANDS],
    gains: [f64; NUM_BANDS],
    sample_rate: f64,
    enabled: bool,
}

/// Builds one channel's cascade wired to the fixed frequency plan.
fn band_cascade(sample_rate: f64) -> [Biquad; NUM_BANDS] {
    core::array::from_fn(|band| {
        let shape = match band {
            0 => FilterShape::LowShelf,
            b if b == NUM_BANDS - 1 => FilterShape::HighShelf,
            _ => FilterShape::Peaking,
        };

        let mut filter = Biquad::new();
        filter.set_shape(shape);
        filter.set_frequency(BAND_FREQUENCIES[band], sample_rate);
        filter.set_q(BAND_Q);
        filter.set_gain_db(0.0);
        filter
    })
}

impl Equalizer {
    /// Creates an equalizer at the given sample rate with all gains at
    /// 0 dB and processing enabled.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            left: band_cascade(sample_rate),
            right: band_cascade(sample_rate),
            gains: [0.0; NUM_BANDS],
            sample_rate,
            enabled: true,
        }
    }

    /// Sets one band's gain in dB, clamped to ±12 dB, on both channel
    /// filters. Out-of-range indices are ignored.
    pub fn set_band_gain(&mut self, band: usize, gain_db: f64) {
        if band >= NUM_BANDS {
            return;
        }

        let gain_db = gain_db.clamp(-GAIN_LIMIT_DB, GAIN_LIMIT_DB);
        self.gains[band] = gain_db;
        self.left[band].set_gain_db(gain_db);
        self.right[band].set_gain_db(gain_db);
    }

    /// Returns one band's gain in dB, or 0.0 for out-of-range indices.
    pub fn band_gain(&self, band: usize) -> f64 {
        if band >= NUM_BANDS {
            return 0.0;
        }
        self.gains[band]
    }

    /// Applies a built-in preset by name. Unknown names are ignored.
    pub fn apply_preset(&mut self, name: &str) {
        let Some(gains) = presets::preset_gains(name) else {
            return;
        };
        for (band, &gain_db) in gains.iter().enumerate().take(NUM_BANDS) {
            self.set_band_gain(band, gain_db);
        }
    }

    /// Sets every band back to 0 dB and flushes all filter state. The
    /// equalizer is afterwards equivalent to a freshly constructed one at
    /// the same sample rate.
    pub fn reset(&mut self) {
        for band in 0..NUM_BANDS {
            self.set_band_gain(band, 0.0);
            self.left[band].reset();
            self.right[band].reset();
        }
    }

    /// Enables or bypasses processing. Disabling flushes filter state (but
    /// not gains) so that re-enabling later does not replay stale filter
    /// energy as a click.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            for band in 0..NUM_BANDS {
                self.left[band].reset();
                self.right[band].reset();
            }
        }
    }

    /// Returns whether processing is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the fixed band frequency plan in Hz.
    pub fn band_frequencies(&self) -> [f64; NUM_BANDS] {
        BAND_FREQUENCIES
    }

    /// Returns the operating sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Processes two planar channel buffers in place.
    ///
    /// Returns immediately when bypassed, leaving the buffers untouched.
    /// Otherwise each frame runs through the ten bands in ascending order
    /// (left samples through the left cascade, right through the right) and
    /// the result is hard-clipped to [-1, 1] before being written back.
    ///
    /// When the buffers differ in length, the trailing samples of the longer
    /// one are left unprocessed.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        if !self.enabled {
            return;
        }

        let frames = left.len().min(right.len());
        for i in 0..frames {
            let mut l = f64::from(left[i]);
            let mut r = f64::from(right[i]);

            for band in 0..NUM_BANDS {
                l = self.left[band].process(l);
                r = self.right[band].process(r);
            }

            left[i] = hard_clip(l, 1.0) as f32;
            right[i] = hard_clip(r, 1.0) as f32;
        }
    }
}
