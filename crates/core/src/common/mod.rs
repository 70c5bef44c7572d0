//! Common utilities and types used throughout the crate.
//!
//! This module provides the building blocks shared by the catalog, generator, and validator:
//! 1. **Constants:** Register file size and assembly syntax markers.
//! 2. **Error Handling:** Lookup, configuration, catalog, and tokenizer errors.

/// Common constants used throughout the crate.
pub mod constants;

/// Error types for catalog lookups, catalog loading, and generation requests.
pub mod error;

pub use error::{CatalogError, ConfigError, ConfigurationError, LookupError, ParseError};
