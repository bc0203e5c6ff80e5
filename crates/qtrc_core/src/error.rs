//! Error types shared by every component of the codec.

use thiserror::Error;

/// Errors that can occur anywhere in the compression or decompression path.
///
/// Every fallible operation in this crate funnels into this single enum —
/// there is no per-component recovery, errors propagate straight to the
/// caller of [`crate::compress`] or [`crate::decompress`].
#[derive(Debug, Error)]
pub enum Error {
	/// The input stream ended before the declared symbol or pixel count was
	/// reached. Returned by the range coder, the bit buffer, and the
	/// quadtree decoder's recursive descent.
	#[error("truncated input: expected more data while {context}")]
	Truncated {
		/// What the reader was doing when it ran out of input.
		context: &'static str,
	},

	/// The range coder's frequency-table search ran past the end of the
	/// symbol alphabet while decoding. Indicates a corrupted stream or a
	/// model mismatch between encoder and decoder.
	#[error("range coder frequency search exhausted the symbol table (corrupt stream)")]
	DecodeError,

	/// A cache index in the command stream referenced a slot that is out
	/// of range or not yet present.
	#[error("cache index {index} out of range or not yet present (cache size {cache_size})")]
	InvalidIndex {
		/// The index that was requested.
		index: usize,
		/// The cache's total slot count.
		cache_size: usize,
	},

	/// A caller supplied a parameter outside its valid domain: negative
	/// range coder order, a symbol width outside `{1, 8}`, a `minsize`
	/// that isn't a power of two, and so on.
	#[error("invalid parameter: {0}")]
	InvalidParameter(String),

	/// The system's allocator could not satisfy a request. Rust's global
	/// allocator aborts the process before this variant could realistically
	/// be constructed; it exists for API completeness with the taxonomy
	/// this codec was designed against.
	#[error("allocation failed")]
	AllocationFailed,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
