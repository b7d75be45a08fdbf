use include_dir::{include_dir, Dir};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::core::Language;
use crate::error::{Result, TermitypeError};

static BUILTIN_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/languages");

/// Every language available for a run, keyed by name.
///
/// Built once at startup and passed by reference afterwards; nothing mutates
/// it after loading.
#[derive(Debug, Default, Clone)]
pub struct LanguageCatalog {
    languages: BTreeMap<String, Language>,
}

impl LanguageCatalog {
    /// Load every `*.json` file in `dir`.
    ///
    /// Files that cannot be read or parsed are skipped with a warning. Fails
    /// with [`TermitypeError::EmptyCatalog`] when nothing loads.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut catalog = Self::default();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("cannot read languages directory {}: {err}", dir.display());
                return catalog.non_empty(dir);
            }
        };

        let paths = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_json(path))
            .sorted();

        for path in paths {
            match load_file(&path) {
                Ok(language) => catalog.insert(language, &path),
                Err(err) => warn!("skipping {err}"),
            }
        }

        catalog.non_empty(dir)
    }

    /// The language files compiled into the binary
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::default();

        let files = BUILTIN_DIR
            .files()
            .filter(|file| is_json(file.path()))
            .sorted_by(|a, b| a.path().cmp(b.path()));

        for file in files {
            let path = file.path();
            let parsed = match file.contents_utf8() {
                Some(contents) => Language::from_json(contents, &file_stem(path)),
                None => Err("file is not valid UTF-8".to_string()),
            };

            match parsed {
                Ok(language) => catalog.insert(language, path),
                Err(reason) => warn!("skipping built-in language {}: {reason}", path.display()),
            }
        }

        catalog.non_empty(Path::new("<built-in>"))
    }

    pub fn from_languages(languages: impl IntoIterator<Item = Language>) -> Self {
        let mut catalog = Self::default();
        for language in languages {
            catalog.insert(language, Path::new("<memory>"));
        }
        catalog
    }

    pub fn find(&self, name: &str) -> Result<&Language> {
        self.languages
            .get(name)
            .ok_or_else(|| TermitypeError::LanguageNotFound {
                name: name.to_string(),
                available: self.list(),
            })
    }

    /// Language names in sorted order
    pub fn list(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    fn insert(&mut self, language: Language, origin: &Path) {
        if self.languages.contains_key(&language.name) {
            warn!(
                "skipping {}: language '{}' is already loaded",
                origin.display(),
                language.name
            );
            return;
        }

        debug!(
            "loaded language '{}' ({} words) from {}",
            language.name,
            language.words.len(),
            origin.display()
        );
        self.languages.insert(language.name.clone(), language);
    }

    fn non_empty(self, dir: &Path) -> Result<Self> {
        if self.is_empty() {
            Err(TermitypeError::EmptyCatalog {
                dir: dir.to_path_buf(),
            })
        } else {
            Ok(self)
        }
    }
}

/// Read and parse a single language file
pub fn load_file(path: &Path) -> Result<Language> {
    let invalid = |reason: String| TermitypeError::InvalidLanguageFile {
        path: path.to_path_buf(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    Language::from_json(&contents, &file_stem(path)).map_err(invalid)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
