//! Property-based tests for the equalizer engine.
//!
//! Uses proptest for randomized gain vectors, band indices, and input
//! buffers to verify clamping, bounded output, and buffer-split continuity.

use proptest::prelude::*;
use tenband_core::{Equalizer, AudioProcessor, NUM_BANDS};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Setting any gain on a valid band reads back as the ±12 dB clamp of
    /// the written value.
    #[test]
    fn gain_reads_back_clamped(
        band in 0usize..NUM_BANDS,
        gain in -100.0f64..100.0f64,
    ) {
        let mut eq = Equalizer::new(48000.0);
        eq.set_band_gain(band, gain);
        prop_assert_eq!(eq.band_gain(band), gain.clamp(-12.0, 12.0));
    }

    /// Writes to out-of-range bands leave every valid band untouched.
    #[test]
    fn out_of_range_writes_are_inert(
        band in NUM_BANDS..10_000usize,
        gain in -100.0f64..100.0f64,
        preset_gain in -12.0f64..12.0f64,
    ) {
        let mut eq = Equalizer::new(48000.0);
        eq.set_band_gain(4, preset_gain);

        eq.set_band_gain(band, gain);

        prop_assert_eq!(eq.band_gain(band), 0.0);
        for valid in 0..NUM_BANDS {
            let expected = if valid == 4 { preset_gain } else { 0.0 };
            prop_assert_eq!(eq.band_gain(valid), expected);
        }
    }

    /// For any gain vector and any input in [-1, 1], every output sample is
    /// finite and stays within [-1, 1].
    #[test]
    fn output_is_bounded_and_finite(
        gains in prop::array::uniform10(-12.0f64..=12.0f64),
        input in prop::collection::vec(-1.0f32..=1.0f32, 64..512),
    ) {
        let mut eq = Equalizer::new(48000.0);
        for (band, &gain) in gains.iter().enumerate() {
            eq.set_band_gain(band, gain);
        }

        let mut left = input.clone();
        let mut right = input;
        eq.process_stereo(&mut left, &mut right);

        for &s in left.iter().chain(right.iter()) {
            prop_assert!(s.is_finite());
            prop_assert!((-1.0..=1.0).contains(&s), "sample {} escaped the clamp", s);
        }
    }

    /// Processing a buffer whole or as two consecutive slices produces
    /// identical output for any split point: filter state carries across
    /// buffer boundaries.
    #[test]
    fn continuity_across_any_split(
        input in prop::collection::vec(-1.0f32..=1.0f32, 16..256),
        split_seed in any::<usize>(),
        gains in prop::array::uniform10(-12.0f64..=12.0f64),
    ) {
        let split = 1 + split_seed % (input.len() - 1);

        let mut whole_eq = Equalizer::new(44100.0);
        let mut split_eq = Equalizer::new(44100.0);
        for (band, &gain) in gains.iter().enumerate() {
            whole_eq.set_band_gain(band, gain);
            split_eq.set_band_gain(band, gain);
        }

        let mut whole_l = input.clone();
        let mut whole_r = input.clone();
        whole_eq.process_stereo(&mut whole_l, &mut whole_r);

        let mut split_l = input.clone();
        let mut split_r = input;
        let (l_head, l_tail) = split_l.split_at_mut(split);
        let (r_head, r_tail) = split_r.split_at_mut(split);
        split_eq.process_stereo(l_head, r_head);
        split_eq.process_stereo(l_tail, r_tail);

        prop_assert_eq!(whole_l, split_l);
        prop_assert_eq!(whole_r, split_r);
    }

    /// The interleaved path is exactly the planar path plus (de)interleaving.
    #[test]
    fn interleaved_equals_planar(
        frames in prop::collection::vec((-1.0f32..=1.0f32, -1.0f32..=1.0f32), 8..128),
        gains in prop::array::uniform10(-12.0f64..=12.0f64),
    ) {
        let mut interleaved_proc = AudioProcessor::new();
        let mut planar_proc = AudioProcessor::new();
        interleaved_proc.initialize(48000.0);
        planar_proc.initialize(48000.0);
        for (band, &gain) in gains.iter().enumerate() {
            interleaved_proc.set_band_gain(band, gain);
            planar_proc.set_band_gain(band, gain);
        }

        let mut interleaved = Vec::with_capacity(frames.len() * 2);
        let mut left = Vec::with_capacity(frames.len());
        let mut right = Vec::with_capacity(frames.len());
        for &(l, r) in &frames {
            interleaved.push(l);
            interleaved.push(r);
            left.push(l);
            right.push(r);
        }

        interleaved_proc.process_interleaved_stereo(&mut interleaved);
        planar_proc.process_separate_channels(&mut left, &mut right);

        for i in 0..frames.len() {
            prop_assert_eq!(interleaved[i * 2], left[i]);
            prop_assert_eq!(interleaved[i * 2 + 1], right[i]);
        }
    }
}
