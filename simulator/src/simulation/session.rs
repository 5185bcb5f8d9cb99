//! One session: 231 d4 draws, counting ones.
//!
//! Three samplers produce the same distribution at different speeds:
//!
//! - [`Sampler::Packed`]: 32 draws per SplitMix64 word, counted with a popcount.
//! - [`Sampler::PerDraw`]: one SplitMix64 word per draw.
//! - [`Sampler::Choice`]: `SmallRng::random_range(0..4)` per draw, the slow
//!   baseline.

use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::constants::*;

use super::fast_prng::{count_face_lanes, session_seed, SplitMix64};

/// Draw strategy used by a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sampler {
    #[default]
    Packed,
    PerDraw,
    Choice,
}

impl Sampler {
    pub const ALL: [Sampler; 3] = [Sampler::Packed, Sampler::PerDraw, Sampler::Choice];

    pub fn name(self) -> &'static str {
        match self {
            Sampler::Packed => "packed",
            Sampler::PerDraw => "per-draw",
            Sampler::Choice => "choice",
        }
    }

    /// Ones rolled in session `index` of a batch seeded with `seed`.
    #[inline]
    pub fn count_ones(self, seed: u64, index: u64) -> u32 {
        match self {
            Sampler::Packed => count_ones_packed(&mut SplitMix64::for_session(seed, index)),
            Sampler::PerDraw => count_ones_per_draw(&mut SplitMix64::for_session(seed, index)),
            Sampler::Choice => {
                count_ones_choice(&mut SmallRng::seed_from_u64(session_seed(seed, index)))
            }
        }
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sampler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sampler::ALL
            .into_iter()
            .find(|sampler| sampler.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Sampler::ALL.iter().map(|s| s.name()).collect();
                format!("unknown sampler '{}' (available: {})", s, names.join(", "))
            })
    }
}

/// Count ones using 32 packed draws per word.
#[inline(always)]
pub fn count_ones_packed(rng: &mut SplitMix64) -> u32 {
    let mut ones = 0;
    for _ in 0..FULL_WORDS_PER_SESSION {
        ones += count_face_lanes(rng.next_u64(), SUCCESS_FACE, DRAWS_PER_WORD);
    }
    ones + count_face_lanes(rng.next_u64(), SUCCESS_FACE, TAIL_DRAWS)
}

/// Count ones using one generator word per draw.
#[inline(always)]
pub fn count_ones_per_draw(rng: &mut SplitMix64) -> u32 {
    let mut ones = 0;
    for _ in 0..ROLLS_PER_SESSION {
        if rng.roll_d4() == SUCCESS_FACE {
            ones += 1;
        }
    }
    ones
}

/// One uniform draw in `0..FACE_COUNT`.
#[inline(always)]
fn roll_face<R: Rng>(rng: &mut R) -> u64 {
    rng.random_range(0..FACE_COUNT as u64)
}

/// Count ones with a uniform range draw per roll.
pub fn count_ones_choice<R: Rng>(rng: &mut R) -> u32 {
    let mut ones = 0;
    for _ in 0..ROLLS_PER_SESSION {
        if roll_face(rng) == SUCCESS_FACE {
            ones += 1;
        }
    }
    ones
}

/// Per-face counts of one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FaceTally {
    /// `counts[f]` = draws that landed on face `f` (0-based).
    pub counts: [u32; FACE_COUNT],
}

impl FaceTally {
    /// Draws that landed on the success face.
    pub fn ones(&self) -> u32 {
        self.counts[SUCCESS_FACE as usize]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Roll a session and tally every face.
pub fn tally_session<R: Rng>(rng: &mut R) -> FaceTally {
    let mut tally = FaceTally::default();
    for _ in 0..ROLLS_PER_SESSION {
        tally.counts[roll_face(rng) as usize] += 1;
    }
    tally
}

/// Tally of session `index` of a batch seeded with `seed`.
pub fn tally_indexed(seed: u64, index: u64) -> FaceTally {
    tally_session(&mut SmallRng::seed_from_u64(session_seed(seed, index)))
}
