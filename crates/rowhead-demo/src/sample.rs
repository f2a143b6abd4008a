#![forbid(unsafe_code)]

//! Sample text: dictionary words with random line breaks.

use std::fs;
use std::path::Path;

use tracing::debug;

/// Used when no word list is installed.
const FALLBACK_WORDS: &[&str] = &[
    "A", "a", "aa", "aal", "aalii", "aam", "Aani", "aardvark", "aardwolf", "Aaron",
    "Aaronic", "Aaronical", "Aaronite", "Aaronitic", "Aaru", "Ab", "aba", "Ababdeh",
    "Ababua", "abac", "abaca", "abacate", "abacay", "abacinate", "abacination",
    "abaciscus", "abacist", "aback", "abactinal", "abactinally", "abaction", "abactor",
    "abaculus", "abacus", "Abadite", "abaff", "abaft", "abaisance", "abaiser", "abaissed",
];

/// Words per generated document.
pub const WORD_LIMIT: usize = 100;

/// One in this many words starts a new line.
pub const LINE_BREAK_ODDS: u32 = 15;

/// Small deterministic generator (64-bit LCG, Knuth's constants).
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    /// Uniform-ish value in `0..bound`; `bound` of zero yields zero.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 { 0 } else { self.next_u32() % bound }
    }
}

/// The first `limit` words of the list at `path`, or of the built-in list if
/// it cannot be read.
#[must_use]
pub fn load_words(path: &Path, limit: usize) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let words: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .take(limit)
                .map(str::to_string)
                .collect();
            if !words.is_empty() {
                return words;
            }
            debug!(path = %path.display(), "word list is empty; using built-in words");
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "word list unavailable; using built-in words");
        }
    }
    FALLBACK_WORDS
        .iter()
        .cycle()
        .take(limit)
        .map(|w| (*w).to_string())
        .collect()
}

/// Join `words` with spaces, starting a new line before a word with
/// probability `1 / LINE_BREAK_ODDS`.
#[must_use]
pub fn sample_text(words: &[String], rng: &mut Lcg) -> String {
    words
        .iter()
        .map(|word| {
            if rng.below(LINE_BREAK_ODDS) == 0 {
                format!("\n{word}")
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
