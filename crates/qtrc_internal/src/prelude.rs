//! Prelude module for `qtrc_internal`.
//!
//! This module provides a convenient way to import commonly used types
//! and traits.
//!
//! # Examples
//!
//! ```rust
//! use qtrc_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let image = Image::from_pixels(2, 2, vec![Pixel::rgb(1, 2, 3); 4], false).unwrap();
//! let mut cache = TileCache::new(256, 64 * 64 * 4).unwrap();
//! ```

// Re-export everything from qtrc_core::prelude
#[doc(inline)]
pub use qtrc_core::prelude::*;

// Re-export the entire qtrc_core module for advanced usage
#[doc(inline)]
pub use qtrc_core;
