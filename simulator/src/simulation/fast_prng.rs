//! Fast PRNG for sampling — SplitMix64 with d4 specialization.
//!
//! SplitMix64 has a single u64 state word, so a generator per session costs
//! nothing to build. That lets every session own its stream, derived from
//! `(batch seed, session index)`, and keeps workers free of shared state.
//!
//! A d4 draw is two bits. One `next_u64` therefore yields 32 draws, and the
//! number of lanes equal to a given face is a mask plus a popcount.

use crate::constants::LOW_LANE_BITS;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 output function applied to `z + γ`.
#[inline(always)]
pub fn mix64(z: u64) -> u64 {
    let mut z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Seed for session `index` of a batch seeded with `seed`.
#[inline(always)]
pub fn session_seed(seed: u64, index: u64) -> u64 {
    mix64(seed ^ mix64(index))
}

/// Count 2-bit lanes of `word` equal to `face`, looking only at the low
/// `lanes` lanes (0..=32).
#[inline(always)]
pub fn count_face_lanes(word: u64, face: u64, lanes: u32) -> u32 {
    // XOR with the face replicated per lane turns matching lanes into 00.
    let w = word ^ (face & 0b11).wrapping_mul(LOW_LANE_BITS);
    let zero = !(w | (w >> 1)) & LOW_LANE_BITS;
    let mask = if lanes >= 32 {
        u64::MAX
    } else {
        (1u64 << (2 * lanes)) - 1
    };
    (zero & mask).count_ones()
}

/// SplitMix64 stream: a Weyl counter stepped by γ, each step finalized by
/// [`mix64`].
#[derive(Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[inline(always)]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator owned by session `index` of a batch seeded with `seed`.
    #[inline(always)]
    pub fn for_session(seed: u64, index: u64) -> Self {
        Self::new(session_seed(seed, index))
    }

    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let out = mix64(self.state);
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        out
    }

    /// Roll one d4 (0-3) from the top two bits of a fresh word.
    #[inline(always)]
    pub fn roll_d4(&mut self) -> u64 {
        self.next_u64() >> 62
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitmix64_reference_output() {
        // Published first outputs of SplitMix64 seeded with 0.
        let mut rng = SplitMix64::new(0);
        assert_eq!(rng.next_u64(), 0xe220_a839_7b1d_cdaf);
        assert_eq!(rng.next_u64(), 0x6e78_9e6a_a1b9_65f4);
    }

    #[test]
    fn test_stream_is_mixed_weyl_sequence() {
        let seed = 0xdead_beef;
        let mut rng = SplitMix64::new(seed);
        for k in 0..64u64 {
            let expected = mix64(seed.wrapping_add(k.wrapping_mul(GOLDEN_GAMMA)));
            assert_eq!(rng.next_u64(), expected, "step {}", k);
        }
    }

    #[test]
    fn test_session_streams_reproducible() {
        let mut a = SplitMix64::for_session(42, 17);
        let mut b = SplitMix64::for_session(42, 17);
        let mut other = SplitMix64::for_session(42, 18);
        let mut differs = false;
        for _ in 0..32 {
            let x = a.next_u64();
            assert_eq!(x, b.next_u64());
            differs |= x != other.next_u64();
        }
        assert!(differs);
    }

    #[test]
    fn test_roll_d4_range() {
        let mut rng = SplitMix64::new(12345);
        for _ in 0..10000 {
            let d = rng.roll_d4();
            assert!(d < 4, "Die out of range: {}", d);
        }
    }

    #[test]
    fn test_roll_d4_distribution() {
        let mut rng = SplitMix64::new(42);
        let mut counts = [0u64; 4];
        let n = 400_000;
        for _ in 0..n {
            counts[rng.roll_d4() as usize] += 1;
        }
        let expected = n as f64 / 4.0;
        for (face, &count) in counts.iter().enumerate() {
            let ratio = count as f64 / expected;
            assert!(
                ratio > 0.98 && ratio < 1.02,
                "Face {} has count {} (expected ~{:.0}, ratio {:.3})",
                face,
                count,
                expected,
                ratio
            );
        }
    }

    #[test]
    fn test_count_face_lanes_known_words() {
        assert_eq!(count_face_lanes(0, 0, 32), 32);
        assert_eq!(count_face_lanes(u64::MAX, 0, 32), 0);
        assert_eq!(count_face_lanes(u64::MAX, 3, 32), 32);
        // Lanes (low first): 1, 0, 2, 0 → two zeros among the first four.
        let word = 0b00_10_00_01u64 | (0b11 << 8);
        assert_eq!(count_face_lanes(word, 0, 4), 2);
        assert_eq!(count_face_lanes(word, 1, 4), 1);
        assert_eq!(count_face_lanes(word, 2, 4), 1);
        assert_eq!(count_face_lanes(word, 3, 5), 1);
        assert_eq!(count_face_lanes(word, 0, 0), 0);
    }

    #[test]
    fn test_count_face_lanes_matches_naive() {
        let mut rng = SplitMix64::new(7);
        for _ in 0..1000 {
            let word = rng.next_u64();
            for lanes in [0u32, 1, 7, 31, 32] {
                for face in 0..4u64 {
                    let naive = (0..lanes)
                        .filter(|&i| (word >> (2 * i)) & 0b11 == face)
                        .count() as u32;
                    assert_eq!(count_face_lanes(word, face, lanes), naive);
                }
            }
        }
    }

    #[test]
    fn test_session_seeds_distinct() {
        let seeds: std::collections::HashSet<u64> =
            (0..10_000).map(|i| session_seed(42, i)).collect();
        assert_eq!(seeds.len(), 10_000);
        assert_ne!(session_seed(1, 0), session_seed(2, 0));
    }
}
