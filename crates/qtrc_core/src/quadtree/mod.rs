//! Recursive quadtree decomposition over an [`Image`], the codec's central
//! component: it drives the split/leaf decision, the tile cache, and the
//! two range-coded streams (`commands`, `colors`) that make up a
//! [`Qti`].

mod decode;
mod encode;

use crate::bitbuffer::BitBuffer;
use crate::error::{Error, Result};
use crate::image::Image;
use crate::tilecache::TileCache;

/// Compression parameters for one quadtree pass.
///
/// `minsize` and `maxdepth` are carried into the [`Qti`] (the decoder
/// needs them to know when a node is a forced leaf); `maxerror`,
/// `lazyness`, and the cache sizing only ever influence the encoder's
/// choices and are not needed to decode.
#[derive(Debug, Clone, Copy)]
pub struct QuadtreeParams {
	/// Per-pixel error tolerance against a uniform fill; `0` is lossless.
	pub maxerror: u16,
	/// Smallest allowed leaf edge. Must be a power of two.
	pub minsize: usize,
	/// Recursion depth cap; `-1` means unlimited.
	pub maxdepth: i32,
	/// Number of low bits masked off each channel before coding (`0..=7`).
	pub lazyness: u8,
}

impl QuadtreeParams {
	/// Validates the parameter set.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidParameter`] if `minsize` isn't a power of
	/// two, `lazyness` is out of `0..=7`, or `maxdepth < -1`.
	pub fn validate(&self) -> Result<()> {
		if !is_power_of_two(self.minsize) {
			return Err(Error::InvalidParameter(format!(
				"minsize must be a power of two, got {}",
				self.minsize
			)));
		}
		if self.lazyness > 7 {
			return Err(Error::InvalidParameter(format!(
				"lazyness must be in 0..=7, got {}",
				self.lazyness
			)));
		}
		if self.maxdepth < -1 {
			return Err(Error::InvalidParameter(format!(
				"maxdepth must be >= -1, got {}",
				self.maxdepth
			)));
		}
		Ok(())
	}
}

fn is_power_of_two(n: usize) -> bool {
	n != 0 && (n & (n - 1)) == 0
}

/// Number of bits needed to index `n` distinct values (`ceil(log2(n))`,
/// `0` for `n <= 1`).
pub(crate) fn bits_for_count(n: usize) -> u32 {
	if n <= 1 { 0 } else { usize::BITS - (n - 1).leading_zeros() }
}

/// The compressor's output and the decompressor's input: the two
/// range-codable bit streams plus the structural parameters the decoder
/// needs to walk the same tree shape.
#[derive(Debug, Clone)]
pub struct Qti {
	pub commands: BitBuffer,
	pub colors: BitBuffer,
	pub minsize: usize,
	pub maxdepth: i32,
	pub width: usize,
	pub height: usize,
}

/// Compresses `input` (optionally relative to `reference`, for delta
/// coding) into a [`Qti`].
///
/// `cache` is threaded in by the caller so it can persist across frames
/// of a video sequence; pass a freshly constructed [`TileCache`] for a
/// standalone still image.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `params` fails validation or
/// `reference`'s dimensions don't match `input`'s.
pub fn compress(
	input: &Image,
	reference: Option<&Image>,
	cache: &mut TileCache,
	params: &QuadtreeParams,
) -> Result<Qti> {
	params.validate()?;

	let source = match reference {
		Some(reference) => input.delta(reference)?,
		None => input.clone(),
	};

	encode::run(&source, cache, params)
}

/// Decompresses `qti` (optionally relative to `reference`) back into an
/// [`Image`].
///
/// # Errors
///
/// Returns [`Error::Truncated`] if either stream underruns, or
/// [`Error::InvalidIndex`] if a cache-hit command references an absent
/// slot.
pub fn decompress(qti: &Qti, reference: Option<&Image>, cache: &mut TileCache) -> Result<Image> {
	let decoded = decode::run(qti, cache)?;

	match reference {
		Some(reference) => decoded.undelta(reference),
		None => Ok(decoded),
	}
}
