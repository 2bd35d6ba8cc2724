//! Scripted randomness for tests and reproducible demos.
//!
//! Synthesis, composition and quiz assembly take any `rand::Rng`. Production
//! code passes the thread-local generator or a seeded `StdRng`; tests that need
//! to steer individual draws pass a [`ScriptedSource`].

use rand::RngCore;
use rand::rand_core::impls;

/// Replays a fixed sequence of 32-bit words, cycling when exhausted.
///
/// `rand` maps a word `w` onto an `n`-way uniform draw as the high half of
/// `w * n`, so `0` always lands on the lowest value of a range and `u32::MAX`
/// on the highest. [`ScriptedSource::from_picks`] computes the word for any
/// other position. An empty script yields `0` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    words: Vec<u32>,
    cursor: usize,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(words: impl Into<Vec<u32>>) -> Self {
        Self {
            words: words.into(),
            cursor: 0,
        }
    }

    /// Script where the i-th draw lands on `index` of an `out_of`-way range.
    #[must_use]
    pub fn from_picks(picks: &[(u32, u32)]) -> Self {
        Self::new(
            picks
                .iter()
                .map(|&(index, out_of)| word_for(index, out_of))
                .collect::<Vec<_>>(),
        )
    }

    /// Number of words handed out so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

/// Smallest word that lands on `index` of an `out_of`-way draw.
///
/// The low half of `word * out_of` stays below `out_of`, so `rand` never
/// spends a second word correcting bias on it.
#[must_use]
pub fn word_for(index: u32, out_of: u32) -> u32 {
    let out_of = u64::from(out_of.max(1));
    let index = u64::from(index).min(out_of - 1);
    let word = ((index << 32) + out_of - 1) / out_of;
    u32::try_from(word).unwrap_or(u32::MAX)
}

impl RngCore for ScriptedSource {
    fn next_u32(&mut self) -> u32 {
        let word = if self.words.is_empty() {
            0
        } else {
            self.words[self.cursor % self.words.len()]
        };
        self.cursor += 1;
        word
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}
