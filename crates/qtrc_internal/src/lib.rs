//! Internal crate for `qtrc`.
//!
//! This module is separated into its own crate to enable simple dynamic
//! linking for `qtrc`, and should not be used directly.
//!
//! # Examples
//!
//! ```rust
//! use qtrc_internal::prelude::*;
//!
//! // All commonly used types are available
//! let mut cache = TileCache::new(256, 64 * 64 * 4).unwrap();
//! ```

/// `use qtrc_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export qtrc_core for convenience
pub use qtrc_core;
