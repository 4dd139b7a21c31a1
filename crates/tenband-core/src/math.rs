//! Mathematical helpers for the equalizer engine.
//!
//! Allocation-free and `no_std`-suitable. Everything here is `f64` because
//! the filter cascade runs in double precision; callers on the `f32` buffer
//! boundary convert at the edges.

use libm::{exp, log};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use tenband_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-9);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f64 = core::f64::consts::LN_10 / 20.0;
    exp(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Input is floored at 1e-12 so silence maps to a large negative number
/// instead of -inf.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f64 = 20.0 / core::f64::consts::LN_10;
    log(linear.max(1e-12)) * FACTOR
}

/// Hard clip to the ±threshold range.
#[inline]
pub fn hard_clip(x: f64, threshold: f64) -> f64 {
    x.clamp(-threshold, threshold)
}
