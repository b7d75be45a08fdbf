use itertools::Itertools;
use log::debug;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, TermitypeError};
use crate::language::Language;

/// Draws the words for a test from a language's word list
pub struct WordGenerator<R: Rng = ThreadRng> {
    rng: R,
}

impl WordGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for WordGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WordGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick `word_count` words uniformly at random, with replacement, in
    /// generation order.
    pub fn generate(&mut self, language: &Language, word_count: usize) -> Result<Vec<String>> {
        if word_count == 0 {
            return Err(TermitypeError::InvalidWordCount(0));
        }

        let words: Vec<String> = (0..word_count)
            .filter_map(|_| language.words.choose(&mut self.rng).cloned())
            .collect();

        debug!(
            "generated {} words from '{}'",
            words.len(),
            language.name
        );
        Ok(words)
    }
}

/// The text the user has to type: the words joined by single spaces
pub fn target_text(words: &[String]) -> String {
    words.iter().join(" ")
}
