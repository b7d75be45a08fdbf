use directories::ProjectDirs;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::language::LanguageCatalog;

/// Name of the language directory looked up in the working directory
pub const LOCAL_LANGUAGES_DIR: &str = "languages";

/// Where the language catalog comes from for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    Directory(PathBuf),
    Builtin,
}

impl LanguageSource {
    pub fn load(&self) -> Result<LanguageCatalog> {
        match self {
            LanguageSource::Directory(dir) => LanguageCatalog::load(dir),
            LanguageSource::Builtin => LanguageCatalog::builtin(),
        }
    }
}

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// An explicit directory always wins. Otherwise `./languages`, then the
    /// per-user data directory, then the languages compiled into the binary.
    pub fn language_source(explicit: Option<&Path>) -> LanguageSource {
        if let Some(dir) = explicit {
            return LanguageSource::Directory(dir.to_path_buf());
        }

        let candidates = [Some(PathBuf::from(LOCAL_LANGUAGES_DIR)), Self::user_languages_dir()];
        match candidates.into_iter().flatten().find(|dir| dir.is_dir()) {
            Some(dir) => {
                debug!("using languages from {}", dir.display());
                LanguageSource::Directory(dir)
            }
            None => {
                debug!("no languages directory found, using built-in languages");
                LanguageSource::Builtin
            }
        }
    }

    pub fn user_languages_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "termitype").map(|proj_dirs| proj_dirs.data_dir().join("languages"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_directory_wins() {
        let dir = tempdir().unwrap();
        assert_eq!(
            AppDirs::language_source(Some(dir.path())),
            LanguageSource::Directory(dir.path().to_path_buf())
        );
    }

    #[test]
    fn explicit_missing_directory_is_kept() {
        // no fallback for a directory the user named
        let source = AppDirs::language_source(Some(Path::new("/definitely/not/here")));
        assert!(source.load().is_err());
    }

    #[test]
    fn builtin_source_loads() {
        let catalog = LanguageSource::Builtin.load().unwrap();
        assert!(catalog.list().contains(&"english".to_string()));
    }

    #[test]
    fn user_dir_is_under_termitype() {
        if let Some(dir) = AppDirs::user_languages_dir() {
            assert!(dir.ends_with("languages"));
        }
    }
}
