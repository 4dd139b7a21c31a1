//! Biquad (bi-quadratic) filter section.
//!
//! Provides a second-order IIR filter configurable as a peaking, low-shelf,
//! or high-shelf band, the three shapes an equalizer band can take.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use core::f64::consts::PI;
use libm::{cos, pow, sin, sqrt};

/// Filter shape of a biquad section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterShape {
    /// Boost or cut around a center frequency.
    Peaking,
    /// Boost or cut everything below the corner frequency.
    LowShelf,
    /// Boost or cut everything above the corner frequency.
    HighShelf,
}

/// Second-order IIR filter section with design parameters.
///
/// Implements the Direct Form I biquad structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// Coefficients are stored normalized (divided by a0), so the recursion
/// above is exact. Every parameter setter recomputes the coefficients
/// immediately; filter state is only touched by [`process`](Biquad::process)
/// and [`reset`](Biquad::reset).
///
/// Arithmetic is `f64` throughout. At 44.1 kHz the 31 Hz band sits five
/// decades below Nyquist and its pole pair lands close to the unit circle;
/// single precision coefficients audibly detune the low shelf.
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Normalized feedforward coefficients
    b0: f64,
    b1: f64,
    b2: f64,

    /// Normalized feedback coefficients (a0 folded in)
    a1: f64,
    a2: f64,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,

    shape: FilterShape,
    frequency: f64,
    sample_rate: f64,
    gain_db: f64,
    q: f64,
}

impl Biquad {
    /// Creates a new biquad with default design parameters:
    /// peaking, 1 kHz at 44.1 kHz, 0 dB, Q = 1.
    ///
    /// A peaking filter at 0 dB is an identity filter, so a fresh biquad
    /// passes signal through unchanged.
    pub fn new() -> Self {
        let mut filter = Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            shape: FilterShape::Peaking,
            frequency: 1000.0,
            sample_rate: 44100.0,
            gain_db: 0.0,
            q: 1.0,
        };
        filter.calculate_coefficients();
        filter
    }

    /// Sets the filter shape and recomputes coefficients.
    pub fn set_shape(&mut self, shape: FilterShape) {
        self.shape = shape;
        self.calculate_coefficients();
    }

    /// Sets the center/corner frequency and sample rate, both in Hz,
    /// and recomputes coefficients.
    pub fn set_frequency(&mut self, frequency: f64, sample_rate: f64) {
        self.frequency = frequency;
        self.sample_rate = sample_rate;
        self.calculate_coefficients();
    }

    /// Sets the gain in dB and recomputes coefficients.
    pub fn set_gain_db(&mut self, gain_db: f64) {
        self.gain_db = gain_db;
        self.calculate_coefficients();
    }

    /// Sets the quality factor and recomputes coefficients.
    pub fn set_q(&mut self, q: f64) {
        self.q = q;
        self.calculate_coefficients();
    }

    /// Returns the normalized coefficients `(b0, b1, b2, a1, a2)`.
    ///
    /// a0 is always 1 after normalization and is not stored.
    pub fn coefficients(&self) -> (f64, f64, f64, f64, f64) {
        (self.b0, self.b1, self.b2, self.a1, self.a2)
    }

    /// RBJ Audio EQ Cookbook coefficient derivation for the three shapes,
    /// normalized by a0 so that `process` can assume a0 = 1.
    fn calculate_coefficients(&mut self) {
        let a = pow(10.0, self.gain_db / 40.0);
        let omega = 2.0 * PI * self.frequency / self.sample_rate;
        let sn = sin(omega);
        let cs = cos(omega);
        let alpha = sn / (2.0 * self.q);

        let (b0, b1, b2, a0, a1, a2) = match self.shape {
            FilterShape::Peaking => (
                1.0 + alpha * a,
                -2.0 * cs,
                1.0 - alpha * a,
                1.0 + alpha / a,
                -2.0 * cs,
                1.0 - alpha / a,
            ),
            FilterShape::LowShelf => {
                let beta = sqrt(a) / self.q;
                (
                    a * ((a + 1.0) - (a - 1.0) * cs + beta * sn),
                    2.0 * a * ((a - 1.0) - (a + 1.0) * cs),
                    a * ((a + 1.0) - (a - 1.0) * cs - beta * sn),
                    (a + 1.0) + (a - 1.0) * cs + beta * sn,
                    -2.0 * ((a - 1.0) + (a + 1.0) * cs),
                    (a + 1.0) + (a - 1.0) * cs - beta * sn,
                )
            }
            FilterShape::HighShelf => {
                let beta = sqrt(a) / self.q;
                (
                    a * ((a + 1.0) + (a - 1.0) * cs + beta * sn),
                    -2.0 * a * ((a - 1.0) + (a + 1.0) * cs),
                    a * ((a + 1.0) + (a - 1.0) * cs - beta * sn),
                    (a + 1.0) - (a - 1.0) * cs + beta * sn,
                    2.0 * ((a - 1.0) - (a + 1.0) * cs),
                    (a + 1.0) - (a - 1.0) * cs - beta * sn,
                )
            }
        };

        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Processes a single sample through the filter.
    ///
    /// Uses Direct Form I; state update order is x2←x1, x1←x, y2←y1, y1←y.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
                                     - self.a1 * self.y1 - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay lines without touching coefficients or parameters.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_passthrough() {
        // Peaking at 0 dB has b == a before normalization, so the
        // normalized section is an identity filter.
        let mut biquad = Biquad::new();

        for i in 0..64 {
            let input = (i as f64 * 0.1).sin() * 0.5;
            let output = biquad.process(input);
            assert!((output - input).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_gain_is_identity_for_all_shapes() {
        for shape in [FilterShape::Peaking, FilterShape::LowShelf, FilterShape::HighShelf] {
            let mut biquad = Biquad::new();
            biquad.set_shape(shape);
            biquad.set_frequency(500.0, 48000.0);
            biquad.set_gain_db(0.0);

            let (b0, b1, b2, a1, a2) = biquad.coefficients();
            assert!((b0 - 1.0).abs() < 1e-9, "{shape:?}: b0 = {b0}");
            assert!((b1 - a1).abs() < 1e-9, "{shape:?}: b1 = {b1}, a1 = {a1}");
            assert!((b2 - a2).abs() < 1e-9, "{shape:?}: b2 = {b2}, a2 = {a2}");
        }
    }

    #[test]
    fn test_coefficients_finite_across_shapes_and_gains() {
        for shape in [FilterShape::Peaking, FilterShape::LowShelf, FilterShape::HighShelf] {
            for gain in [-12.0, -6.0, 0.0, 6.0, 12.0] {
                let mut biquad = Biquad::new();
                biquad.set_shape(shape);
                biquad.set_frequency(31.0, 44100.0);
                biquad.set_gain_db(gain);

                let (b0, b1, b2, a1, a2) = biquad.coefficients();
                for (name, c) in [("b0", b0), ("b1", b1), ("b2", b2), ("a1", a1), ("a2", a2)] {
                    assert!(c.is_finite(), "{shape:?} @ {gain} dB: {name} = {c}");
                }
            }
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut biquad = Biquad::new();
        biquad.set_gain_db(6.0);

        for _ in 0..32 {
            biquad.process(1.0);
        }

        biquad.reset();

        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);

        // Coefficients survive the reset: silence in, silence out, and the
        // first non-zero sample sees the boosted b0.
        assert_eq!(biquad.process(0.0), 0.0);
    }

    #[test]
    fn test_peaking_boost_passes_dc_unchanged() {
        // A peaking band leaves frequencies far from its center alone; DC is
        // as far from 1 kHz as it gets.
        let mut biquad = Biquad::new();
        biquad.set_frequency(1000.0, 44100.0);
        biquad.set_gain_db(10.0);

        let mut output = 0.0;
        for _ in 0..4000 {
            output = biquad.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.05, "DC gain was {output}");
    }

    #[test]
    fn test_low_shelf_boosts_dc() {
        let mut biquad = Biquad::new();
        biquad.set_shape(FilterShape::LowShelf);
        biquad.set_frequency(31.0, 44100.0);
        biquad.set_gain_db(6.0);

        // DC sits fully on the shelf: steady-state gain approaches +6 dB.
        let mut output = 0.0;
        for _ in 0..200_000 {
            output = biquad.process(1.0);
        }
        let expected = pow(10.0, 6.0 / 20.0);
        assert!(
            (output - expected).abs() < 0.05,
            "shelf DC gain was {output}, expected {expected}"
        );
    }

    #[test]
    fn test_parameter_change_keeps_state() {
        let mut biquad = Biquad::new();
        biquad.set_gain_db(6.0);

        for i in 0..64 {
            biquad.process((i as f64 * 0.3).sin());
        }
        let state = (biquad.x1, biquad.x2, biquad.y1, biquad.y2);
        assert_ne!(state, (0.0, 0.0, 0.0, 0.0));

        // Changing a parameter must not flush the delay lines.
        biquad.set_gain_db(3.0);
        assert_eq!((biquad.x1, biquad.x2, biquad.y1, biquad.y2), state);
    }
}
