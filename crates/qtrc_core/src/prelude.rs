//! Prelude module for `qtrc_core`.
//!
//! Brings the types most callers need for a basic compress/decompress
//! round trip into scope with a single `use`.
//!
//! # Examples
//!
//! ```no_run
//! use qtrc_core::prelude::*;
//!
//! let mut cache = TileCache::new(256, 64 * 64 * 4).unwrap();
//! let params = QuadtreeParams { maxerror: 0, minsize: 1, maxdepth: -1, lazyness: 0 };
//! ```

#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::bitbuffer::BitBuffer;

#[doc(inline)]
pub use crate::rangecoder::{Order, RangeCoder, SymbolWidth};

#[doc(inline)]
pub use crate::tilecache::{TileCache, fletcher16};

#[doc(inline)]
pub use crate::image::{Image, Pixel};

#[doc(inline)]
pub use crate::quadtree::{QuadtreeParams, Qti, compress, decompress};

#[doc(inline)]
pub use crate::container;

#[doc(inline)]
pub use crate::capture::FrameSource;
