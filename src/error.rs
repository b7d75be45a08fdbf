use std::path::PathBuf;

/// Errors surfaced by the catalog, the generator and the terminal layer.
///
/// An interrupted session is not represented here; it is a normal way for a
/// session to end, see [`crate::session::FinishReason::Interrupted`].
#[derive(thiserror::Error, Debug)]
pub enum TermitypeError {
    #[error("language '{name}' not found (available: {})", .available.join(", "))]
    LanguageNotFound { name: String, available: Vec<String> },

    #[error("invalid language file {}: {reason}", .path.display())]
    InvalidLanguageFile { path: PathBuf, reason: String },

    #[error("no languages found in '{}'", .dir.display())]
    EmptyCatalog { dir: PathBuf },

    #[error("invalid word count {0}: must be a positive integer")]
    InvalidWordCount(i64),

    #[error("stdin must be a tty")]
    NotATty,

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TermitypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_not_found_lists_alternatives() {
        let err = TermitypeError::LanguageNotFound {
            name: "klingon".to_string(),
            available: vec!["english".to_string(), "german".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "language 'klingon' not found (available: english, german)"
        );
    }

    #[test]
    fn invalid_word_count_message() {
        assert_eq!(
            TermitypeError::InvalidWordCount(-3).to_string(),
            "invalid word count -3: must be a positive integer"
        );
    }

    #[test]
    fn not_a_tty_message() {
        assert_eq!(TermitypeError::NotATty.to_string(), "stdin must be a tty");
    }

    #[test]
    fn empty_catalog_mentions_directory() {
        let err = TermitypeError::EmptyCatalog {
            dir: PathBuf::from("languages"),
        };
        assert_eq!(err.to_string(), "no languages found in 'languages'");
    }
}
