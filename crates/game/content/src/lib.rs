//! Board descriptions and rules configuration.
//!
//! This crate turns files into game-core values:
//! - board descriptions (`V`/`E` token stream) into a [`game_core::GameGraph`]
//! - rules configuration (TOML) into a [`game_core::GameConfig`]
//!
//! Content is loaded once at startup and never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BoardLoader, ConfigLoader, FormatCause, LoadFormatError};
