//! Tenband Core - DSP engine for a ten-band stereo equalizer
//!
//! This crate provides the building blocks of the equalizer engine:
//!
//! - [`Biquad`] second-order IIR section with peaking and shelving shapes
//! - [`Equalizer`] ten-band stereo cascade with presets and bypass
//! - [`AudioProcessor`] buffer-level front end over interleaved or planar
//!   sample layouts
//! - [`presets`] built-in preset table
//!
//! All processing paths are allocation-free once buffers have reached their
//! working size, never block, and never perform I/O. Internal filter
//! arithmetic is double precision; the buffer boundary is `f32` normalized
//! to [-1, 1].
//!
//! ## no_std Support
//!
//! This crate is `no_std` compatible. Use `default-features = false` in your
//! `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tenband-core = { version = "0.1", default-features = false }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tenband_core::Equalizer;
//!
//! let mut eq = Equalizer::new(48000.0);
//! eq.apply_preset("bass_boost");
//! eq.set_band_gain(9, 3.0);
//!
//! let mut left = [0.25f32; 256];
//! let mut right = [0.25f32; 256];
//! eq.process_stereo(&mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod equalizer;
pub mod math;
pub mod presets;
pub mod processor;

// Re-export main types at crate root
pub use biquad::{Biquad, FilterShape};
pub use equalizer::{Equalizer, BAND_FREQUENCIES, NUM_BANDS};
pub use math::{db_to_linear, hard_clip, linear_to_db};
pub use presets::{is_preset, preset_gains, PRESET_NAMES};
pub use processor::AudioProcessor;
