//! Codec configuration: a `serde`-deserializable mirror of the
//! compressor's tuning knobs, loadable from a TOML file and overridable
//! by CLI flags.
//!
//! This lives in the root crate rather than `qtrc_core` on purpose: the
//! core library's [`qtrc_core::compress`] takes validated primitive
//! arguments directly, matching the spec it implements. Config loading
//! is an ambient convenience for the CLI demo, not part of the codec's
//! public contract.

use qtrc_core::error::{Error, Result};
use qtrc_core::quadtree::QuadtreeParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full set of tunables a caller can set to shape a compression
/// pass: the quadtree's split/leaf decision plus the tile cache's
/// sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
	/// Per-pixel error tolerance against a uniform fill; `0` is lossless.
	pub maxerror: u16,
	/// Smallest allowed leaf edge. Must be a power of two.
	pub minsize: usize,
	/// Recursion depth cap; `-1` means unlimited.
	pub maxdepth: i32,
	/// Number of low bits masked off each channel before coding (`0..=7`).
	pub lazyness: u8,
	/// Number of tile slots the cache holds.
	pub cache_size: usize,
}

impl Default for CodecConfig {
	fn default() -> Self {
		Self { maxerror: 0, minsize: 1, maxdepth: -1, lazyness: 0, cache_size: 256 }
	}
}

impl CodecConfig {
	/// Loads configuration from an optional TOML file, falling back to
	/// [`CodecConfig::default`] for any field the file doesn't set.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidParameter`] if the file can't be read or
	/// parsed, or if the resulting configuration fails [`CodecConfig::validate`].
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let defaults = Self::default();
		let build = || -> std::result::Result<config::Config, config::ConfigError> {
			let mut builder = config::Config::builder()
				.set_default("maxerror", i64::from(defaults.maxerror))?
				.set_default("minsize", defaults.minsize as i64)?
				.set_default("maxdepth", i64::from(defaults.maxdepth))?
				.set_default("lazyness", i64::from(defaults.lazyness))?
				.set_default("cache_size", defaults.cache_size as i64)?;

			if let Some(path) = path {
				builder = builder.add_source(config::File::from(path));
			}
			builder.build()
		};

		let raw = build().map_err(|e| Error::InvalidParameter(format!("loading config: {e}")))?;
		let loaded: Self =
			raw.try_deserialize().map_err(|e| Error::InvalidParameter(format!("parsing config: {e}")))?;
		loaded.validate()?;
		Ok(loaded)
	}

	/// Validates every field against the same domain the quadtree codec
	/// itself enforces (see [`QuadtreeParams::validate`]), plus the
	/// cache-specific fields this config layer owns.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidParameter`] describing the first invalid
	/// field found.
	pub fn validate(&self) -> Result<()> {
		self.to_params().validate()?;
		if self.cache_size == 0 {
			return Err(Error::InvalidParameter("cache_size must be non-zero".into()));
		}
		Ok(())
	}

	/// Projects this configuration's codec-facing fields into a
	/// [`QuadtreeParams`].
	pub fn to_params(&self) -> QuadtreeParams {
		QuadtreeParams {
			maxerror: self.maxerror,
			minsize: self.minsize,
			maxdepth: self.maxdepth,
			lazyness: self.lazyness,
		}
	}
}
