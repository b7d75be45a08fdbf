// Library surface for headless/integration tests and reuse.
// The CLI itself lives in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod language;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod typing_policy;
pub mod ui;
pub mod word_generator;

pub use error::{Result, TermitypeError};
