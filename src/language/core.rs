use serde::Deserialize;
use serde_json::from_str;

/// A named word list loaded from a language file
#[derive(Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    pub words: Vec<String>,
}

#[derive(Deserialize)]
struct LanguageFile {
    name: Option<String>,
    words: Vec<String>,
}

impl Language {
    /// Build a definition directly. Blank words are dropped; returns `None`
    /// when nothing remains.
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Option<Self> {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return None;
        }

        Some(Self {
            name: name.into(),
            words,
        })
    }

    /// Parse a language file. `fallback_name` is used when the file has no
    /// `name` field (usually the file stem).
    pub fn from_json(contents: &str, fallback_name: &str) -> Result<Self, String> {
        let file: LanguageFile = from_str(contents).map_err(|e| e.to_string())?;

        let name = match file.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => fallback_name.to_string(),
        };

        Self::new(name, file.words).ok_or_else(|| "word list is empty".to_string())
    }
}
