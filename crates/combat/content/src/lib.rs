//! Data-driven combat content and loaders.
//!
//! This crate houses the built-in modifier catalog and provides loaders for
//! RON/TOML data files:
//! - Modifier catalogs (data-driven via RON)
//! - Combat balance configuration (data-driven via TOML)
//!
//! All loaders deserialize combat-core types directly; nothing here adds
//! rules of its own.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, ModifierCatalog, ModifierLoader, builtin_modifiers,
};
