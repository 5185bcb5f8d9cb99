//! Constants of the Graveler scenario and the packed draw layout.

/// Rolls in one session.
pub const ROLLS_PER_SESSION: u32 = 231;

/// Faces on the die. Draws are 2-bit values in `0..FACE_COUNT`.
pub const FACE_COUNT: usize = 4;

/// Face counted as a "one", as a 0-based draw value.
pub const SUCCESS_FACE: u64 = 0;

/// Mean ones per session: 231 / 4.
pub const EXPECTED_ONES: f64 = ROLLS_PER_SESSION as f64 / FACE_COUNT as f64;

/// Ones a session must reach for the early-stopping search to stop.
pub const DEFAULT_SEARCH_TARGET: u32 = 177;

/// 2-bit draws held by one 64-bit PRNG word.
pub const DRAWS_PER_WORD: u32 = 32;

/// Whole words consumed per session (7 × 32 = 224 draws).
pub const FULL_WORDS_PER_SESSION: u32 = ROLLS_PER_SESSION / DRAWS_PER_WORD;

/// Draws taken from the final, partially used word (231 − 224 = 7).
pub const TAIL_DRAWS: u32 = ROLLS_PER_SESSION % DRAWS_PER_WORD;

/// Low bit of every 2-bit lane.
pub const LOW_LANE_BITS: u64 = 0x5555_5555_5555_5555;

/// Seed used when neither the caller nor the environment supplies one.
pub const DEFAULT_SEED: u64 = 42;
