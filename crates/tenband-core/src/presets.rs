//! Built-in equalizer presets.
//!
//! A fixed, read-only mapping from preset name to a ten-band gain vector in
//! dB, one entry per band in ascending frequency order. Names are
//! case-sensitive ASCII identifiers. Preset gains pass through the same
//! ±12 dB clamp as any other gain write.

use crate::equalizer::NUM_BANDS;

/// Names of all built-in presets, in table order.
pub static PRESET_NAMES: &[&str] = &[
    "flat",
    "rock",
    "pop",
    "jazz",
    "classical",
    "electronic",
    "hiphop",
    "acoustic",
    "bass_boost",
    "treble_boost",
    "vocal_boost",
    "dance",
];

/// Preset gain vectors, dB per band in ascending band order.
static PRESETS: &[(&str, [f64; NUM_BANDS])] = &[
    ("flat",         [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("rock",         [5.0, 3.0, -2.0, -3.0, -1.0, 1.0, 3.0, 4.0, 5.0, 5.0]),
    ("pop",          [-1.0, 2.0, 4.0, 4.0, 2.0, 0.0, -1.0, -1.0, -1.0, -1.0]),
    ("jazz",         [4.0, 3.0, 1.0, 2.0, -1.0, -1.0, 0.0, 1.0, 3.0, 4.0]),
    ("classical",    [5.0, 4.0, 3.0, 2.0, -1.0, -1.0, 0.0, 2.0, 3.0, 4.0]),
    ("electronic",   [5.0, 4.0, 2.0, 0.0, -2.0, 2.0, 1.0, 2.0, 4.0, 5.0]),
    ("hiphop",       [5.0, 4.0, 1.0, 3.0, -1.0, -1.0, 1.0, -1.0, 2.0, 3.0]),
    ("acoustic",     [4.0, 3.0, 2.0, 1.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0]),
    ("bass_boost",   [8.0, 6.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("treble_boost", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 4.0, 6.0, 8.0]),
    ("vocal_boost",  [-2.0, -1.0, 0.0, 1.0, 4.0, 4.0, 3.0, 1.0, 0.0, -1.0]),
    ("dance",        [4.0, 3.0, 2.0, 0.0, 0.0, -1.0, 2.0, 3.0, 4.0, 4.0]),
];

/// Look up a preset's gain vector by name. Lookup is case-sensitive;
/// unknown names return `None`.
pub fn preset_gains(name: &str) -> Option<&'static [f64; NUM_BANDS]> {
    PRESETS
        .iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, gains)| gains)
}

/// Returns true if `name` is a built-in preset.
pub fn is_preset(name: &str) -> bool {
    preset_gains(name).is_some()
}
