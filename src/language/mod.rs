pub mod catalog;
pub mod core;

// Re-export the main types for convenience
pub use catalog::{load_file, LanguageCatalog};
pub use core::Language;
