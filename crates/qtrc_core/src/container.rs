//! On-disk framing for a compressed [`Qti`]: a fixed-size header
//! followed by the two range-coded payloads (`commands`, `colors`).
//!
//! The exact byte layout belongs to this out-of-scope-by-design I/O
//! layer, not to the quadtree codec itself; `qtrc-core` only needs to
//! agree on the range coder parameters each stream is coded with:
//! `bits=1, order=1` for commands, `bits=8, order=1` for colors.

use crate::bitbuffer::BitBuffer;
use crate::error::{Error, Result};
use crate::quadtree::Qti;
use crate::rangecoder::{Order, RangeCoder, SymbolWidth};

const HEADER_LEN: usize = 46;

/// The fixed-size header preceding the two range-coded payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
	pub width: u16,
	pub height: u16,
	/// Whether the caller applied the YCoCg colorspace transform before
	/// compressing; purely informational for a reader deciding whether
	/// to invert it after decompression.
	pub transform: bool,
	pub minsize: u16,
	pub maxdepth: i16,
	pub lazyness: u8,
	/// Tile cache capacity (in entries) the encoder used. The decoder
	/// must build a cache of the same capacity: the cache-hit index
	/// width is `bits_for_count(cache.capacity())`, so a mismatched
	/// capacity desynchronizes the command stream.
	pub cache_size: u32,
	commands_bit_len: u64,
	commands_byte_len: u64,
	colors_bit_len: u64,
	colors_byte_len: u64,
}

impl ContainerHeader {
	fn to_bytes(self) -> [u8; HEADER_LEN] {
		let mut out = [0u8; HEADER_LEN];
		out[0..2].copy_from_slice(&self.width.to_le_bytes());
		out[2..4].copy_from_slice(&self.height.to_le_bytes());
		out[4] = u8::from(self.transform);
		out[5..7].copy_from_slice(&self.minsize.to_le_bytes());
		out[7..9].copy_from_slice(&self.maxdepth.to_le_bytes());
		out[9] = self.lazyness;
		out[10..14].copy_from_slice(&self.cache_size.to_le_bytes());
		out[14..22].copy_from_slice(&self.commands_bit_len.to_le_bytes());
		out[22..30].copy_from_slice(&self.commands_byte_len.to_le_bytes());
		out[30..38].copy_from_slice(&self.colors_bit_len.to_le_bytes());
		out[38..46].copy_from_slice(&self.colors_byte_len.to_le_bytes());
		out
	}

	fn from_bytes(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < HEADER_LEN {
			return Err(Error::Truncated { context: "reading the QTI container header" });
		}
		let u16_at = |r: std::ops::Range<usize>| u16::from_le_bytes(bytes[r].try_into().unwrap());
		let u32_at = |r: std::ops::Range<usize>| u32::from_le_bytes(bytes[r].try_into().unwrap());
		let u64_at = |r: std::ops::Range<usize>| u64::from_le_bytes(bytes[r].try_into().unwrap());

		Ok(Self {
			width: u16_at(0..2),
			height: u16_at(2..4),
			transform: bytes[4] != 0,
			minsize: u16_at(5..7),
			maxdepth: i16::from_le_bytes(bytes[7..9].try_into().unwrap()),
			lazyness: bytes[9],
			cache_size: u32_at(10..14),
			commands_bit_len: u64_at(14..22),
			commands_byte_len: u64_at(22..30),
			colors_bit_len: u64_at(30..38),
			colors_byte_len: u64_at(38..46),
		})
	}
}

/// Entropy-codes `qti`'s two streams and frames them behind a header,
/// producing bytes suitable for writing to a file.
///
/// `cache_size` is the capacity of the [`TileCache`](crate::tilecache::TileCache)
/// the encoder used to produce `qti`; it is persisted in the header so
/// [`decode`] can hand the caller a cache of matching capacity before
/// decompressing.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `qti`'s dimensions or
/// parameters don't fit the header's field widths.
pub fn encode(qti: &Qti, transform: bool, lazyness: u8, cache_size: usize) -> Result<Vec<u8>> {
	let width = u16::try_from(qti.width)
		.map_err(|_| Error::InvalidParameter(format!("width {} too large for container", qti.width)))?;
	let height = u16::try_from(qti.height).map_err(|_| {
		Error::InvalidParameter(format!("height {} too large for container", qti.height))
	})?;
	let minsize = u16::try_from(qti.minsize).map_err(|_| {
		Error::InvalidParameter(format!("minsize {} too large for container", qti.minsize))
	})?;
	let maxdepth = i16::try_from(qti.maxdepth).map_err(|_| {
		Error::InvalidParameter(format!("maxdepth {} out of range for container", qti.maxdepth))
	})?;
	let cache_size = u32::try_from(cache_size).map_err(|_| {
		Error::InvalidParameter(format!("cache_size {cache_size} too large for container"))
	})?;

	let mut commands_source = qti.commands.clone();
	commands_source.rewind();
	let commands_bit_len = qti.commands.size();
	let mut commands_compressed = BitBuffer::new();
	RangeCoder::new(Order::One, SymbolWidth::One).encode(
		&mut commands_source,
		commands_bit_len,
		&mut commands_compressed,
	)?;

	let mut colors_source = qti.colors.clone();
	colors_source.rewind();
	let colors_bit_len = qti.colors.size();
	let mut colors_compressed = BitBuffer::new();
	RangeCoder::new(Order::One, SymbolWidth::Eight).encode(
		&mut colors_source,
		colors_bit_len / 8,
		&mut colors_compressed,
	)?;

	let header = ContainerHeader {
		width,
		height,
		transform,
		minsize,
		maxdepth,
		lazyness,
		cache_size,
		commands_bit_len: commands_bit_len as u64,
		commands_byte_len: commands_compressed.as_bytes().len() as u64,
		colors_bit_len: colors_bit_len as u64,
		colors_byte_len: colors_compressed.as_bytes().len() as u64,
	};

	let mut out = Vec::with_capacity(HEADER_LEN + commands_compressed.as_bytes().len() + colors_compressed.as_bytes().len());
	out.extend_from_slice(&header.to_bytes());
	out.extend_from_slice(commands_compressed.as_bytes());
	out.extend_from_slice(colors_compressed.as_bytes());
	Ok(out)
}

/// Parses a header and entropy-decodes its two payloads back into a
/// [`Qti`], along with the `transform` flag and tile cache capacity the
/// caller originally passed to [`encode`]. The caller must build its
/// decode-side [`TileCache`](crate::tilecache::TileCache) with this
/// capacity, or cache-hit indices will desynchronize against the
/// encoder's bit width.
///
/// # Errors
///
/// Returns [`Error::Truncated`] if `bytes` doesn't hold a complete
/// header and both payloads.
pub fn decode(bytes: &[u8]) -> Result<(Qti, bool, usize)> {
	let header = ContainerHeader::from_bytes(bytes)?;

	let commands_start = HEADER_LEN;
	let commands_end = commands_start + header.commands_byte_len as usize;
	let colors_end = commands_end + header.colors_byte_len as usize;
	if bytes.len() < colors_end {
		return Err(Error::Truncated { context: "reading the QTI container's payloads" });
	}

	let mut commands_compressed =
		BitBuffer::from_bytes(bytes[commands_start..commands_end].to_vec(), header.commands_byte_len as usize * 8);
	let mut commands = BitBuffer::new();
	RangeCoder::new(Order::One, SymbolWidth::One).decode(
		&mut commands_compressed,
		header.commands_bit_len as usize,
		&mut commands,
	)?;
	commands.rewind();

	let mut colors_compressed =
		BitBuffer::from_bytes(bytes[commands_end..colors_end].to_vec(), header.colors_byte_len as usize * 8);
	let mut colors = BitBuffer::new();
	RangeCoder::new(Order::One, SymbolWidth::Eight).decode(
		&mut colors_compressed,
		header.colors_bit_len as usize / 8,
		&mut colors,
	)?;
	colors.rewind();

	let qti = Qti {
		commands,
		colors,
		minsize: header.minsize as usize,
		maxdepth: header.maxdepth as i32,
		width: header.width as usize,
		height: header.height as usize,
	};
	Ok((qti, header.transform, header.cache_size as usize))
}
