use std::path::PathBuf;

use crate::app_dirs::AppDirs;
use crate::error::{Result, TermitypeError};
use crate::language::LanguageCatalog;

pub const DEFAULT_LANGUAGE: &str = "english";
pub const DEFAULT_WORD_COUNT: usize = 25;

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub language: String,
    pub number_of_words: usize,
    pub languages_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            number_of_words: DEFAULT_WORD_COUNT,
            languages_dir: None,
        }
    }
}

impl Config {
    /// Build a config from raw user input. `number_of_words` is signed so
    /// negative values surface as [`TermitypeError::InvalidWordCount`].
    pub fn new(
        language: impl Into<String>,
        number_of_words: i64,
        languages_dir: Option<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            language: language.into(),
            number_of_words: validate_word_count(number_of_words)?,
            languages_dir,
        })
    }

    pub fn load_catalog(&self) -> Result<LanguageCatalog> {
        AppDirs::language_source(self.languages_dir.as_deref()).load()
    }
}

pub fn validate_word_count(n: i64) -> Result<usize> {
    match usize::try_from(n) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(TermitypeError::InvalidWordCount(n)),
    }
}
