//! Core codec types for `qtrc`: a lossless/near-lossless image and video
//! codec built on quadtree decomposition, an adaptive context-modeled
//! range coder, and a content-addressed tile cache.
//!
//! # Pipeline
//!
//! A frame flows through the crate's modules in this order:
//!
//! 1. [`image`] — the pixel model. Optionally apply [`image::Pixel::to_ycocg`]
//!    and [`image::Image::delta`] against a reference frame before
//!    compressing.
//! 2. [`quadtree`] — [`quadtree::compress`]/[`quadtree::decompress`] walk the
//!    image as a quadtree, backed by a [`tilecache::TileCache`], producing a
//!    [`quadtree::Qti`]: two plaintext bit streams (`commands`, `colors`).
//! 3. [`rangecoder`] — entropy-codes each of those two streams independently.
//! 4. [`container`] — frames the compressed streams behind a fixed header
//!    for storage or transmission.
//!
//! [`capture::FrameSource`] is the boundary a video pipeline's frame grabber
//! is expected to implement; this crate has no opinion on how frames are
//! actually captured.
//!
//! # Examples
//!
//! ```rust
//! use qtrc_core::prelude::*;
//!
//! let image = Image::from_pixels(4, 4, vec![Pixel::rgb(10, 20, 30); 16], false).unwrap();
//! let mut cache = TileCache::new(256, 64 * 64 * 4).unwrap();
//! let params = QuadtreeParams { maxerror: 0, minsize: 1, maxdepth: -1, lazyness: 0 };
//!
//! let qti = compress(&image, None, &mut cache, &params).unwrap();
//! let mut cache = TileCache::new(256, 64 * 64 * 4).unwrap();
//! let decoded = decompress(&qti, None, &mut cache).unwrap();
//! assert_eq!(decoded.pixels(), image.pixels());
//! ```

pub mod bitbuffer;
pub mod capture;
pub mod container;
pub mod error;
pub mod image;
pub mod quadtree;
pub mod rangecoder;
pub mod tilecache;

pub mod prelude;

pub use error::{Error, Result};
pub use quadtree::{QuadtreeParams, Qti, compress, decompress};
