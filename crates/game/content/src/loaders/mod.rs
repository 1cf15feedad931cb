//! File loaders: board descriptions and rules configuration.
//!
//! Board descriptions report a typed [`LoadFormatError`] carrying the failing
//! line. Rules configuration goes through TOML and reports with `anyhow`.

pub mod board;
pub mod config;

pub use board::{BoardLoader, FormatCause, LoadFormatError};
pub use config::ConfigLoader;

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
