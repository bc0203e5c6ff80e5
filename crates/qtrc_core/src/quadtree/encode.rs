//! Recursive encoder half of the quadtree codec.

use super::{QuadtreeParams, Qti, bits_for_count};
use crate::bitbuffer::BitBuffer;
use crate::error::Result;
use crate::image::{Image, Pixel};
use crate::tilecache::TileCache;

pub(crate) fn run(image: &Image, cache: &mut TileCache, params: &QuadtreeParams) -> Result<Qti> {
	let mut state = EncodeState {
		image,
		params,
		cache,
		index_bits: bits_for_count(cache.capacity()),
		commands: BitBuffer::new(),
		colors: BitBuffer::new(),
	};
	state.node(0, 0, image.width(), image.height(), 0)?;

	Ok(Qti {
		commands: state.commands,
		colors: state.colors,
		minsize: params.minsize,
		maxdepth: params.maxdepth,
		width: image.width(),
		height: image.height(),
	})
}

struct EncodeState<'a> {
	image: &'a Image,
	params: &'a QuadtreeParams,
	cache: &'a mut TileCache,
	index_bits: u32,
	commands: BitBuffer,
	colors: BitBuffer,
}

/// Per-pixel max-channel absolute difference between `a` and `b`.
fn channel_error(a: Pixel, b: Pixel) -> u16 {
	let d = |x: u8, y: u8| u16::from(x.abs_diff(y));
	d(a.x, b.x).max(d(a.y, b.y)).max(d(a.z, b.z)).max(d(a.a, b.a))
}

/// Whether a node at `(x, y, w, h)` reached leaf status purely because it
/// can no longer be split (`true`), as opposed to because its content
/// happened to meet the uniformity/error criterion early.
fn is_forced(params: &QuadtreeParams, w: usize, h: usize, depth: i32) -> bool {
	(w <= params.minsize && h <= params.minsize) || (params.maxdepth >= 0 && depth >= params.maxdepth)
}

impl EncodeState<'_> {
	fn node(&mut self, x: usize, y: usize, w: usize, h: usize, depth: i32) -> Result<()> {
		if w == 0 || h == 0 {
			return Ok(());
		}

		if is_forced(self.params, w, h, depth) {
			return self.leaf(x, y, w, h);
		}

		let (fill, uniform, error) = self.analyze(x, y, w, h);
		if uniform || error <= self.params.maxerror {
			self.commands.append_bit(false);
			return self.leaf_with_fill(x, y, w, h, fill, uniform);
		}

		self.commands.append_bit(true);

		let left_w = w / 2;
		let right_w = w - left_w;
		let top_h = h / 2;
		let bottom_h = h - top_h;

		self.node(x, y, left_w, top_h, depth + 1)?;
		self.node(x + left_w, y, right_w, top_h, depth + 1)?;
		self.node(x, y + top_h, left_w, bottom_h, depth + 1)?;
		self.node(x + left_w, y + top_h, right_w, bottom_h, depth + 1)
	}

	/// The top-left masked pixel (candidate uniform fill) plus whether
	/// every masked pixel in the rect matches it and the worst-case
	/// channel error against it.
	fn analyze(&self, x: usize, y: usize, w: usize, h: usize) -> (Pixel, bool, u16) {
		let lazyness = self.params.lazyness;
		let fill = self.image.get(x, y).expect("rect within image bounds").mask(lazyness);

		let mut uniform = true;
		let mut error = 0u16;
		for yy in y..y + h {
			for xx in x..x + w {
				let p = self.image.get(xx, yy).expect("rect within image bounds");
				if p.mask(lazyness) != fill {
					uniform = false;
				}
				error = error.max(channel_error(p, fill));
			}
		}
		(fill, uniform, error)
	}

	fn leaf(&mut self, x: usize, y: usize, w: usize, h: usize) -> Result<()> {
		let (fill, uniform, error) = self.analyze(x, y, w, h);
		let approximable = uniform || error <= self.params.maxerror;
		self.leaf_with_fill(x, y, w, h, fill, approximable)
	}

	fn leaf_with_fill(
		&mut self,
		x: usize,
		y: usize,
		w: usize,
		h: usize,
		fill: Pixel,
		approximable: bool,
	) -> Result<()> {
		if w == 1 && h == 1 {
			self.colors.append_byte(fill.x);
			self.colors.append_byte(fill.y);
			self.colors.append_byte(fill.z);
			self.colors.append_byte(fill.a);
			return Ok(());
		}

		let lazyness = self.params.lazyness;

		// The cache must hold exactly what the decoder will reconstruct for
		// this leaf, not the leaf's true (possibly non-uniform) content.
		// Otherwise a lossy uniform-fill approximation leaves the encoder
		// and decoder caches holding different bytes at the same index,
		// and a later cache-hit leaf decodes to the wrong pixels.
		let reconstructed: Vec<u8> = if approximable {
			let bytes = fill.to_bytes();
			let mut tile = Vec::with_capacity(w * h * 4);
			for _ in 0..w * h {
				tile.extend_from_slice(&bytes);
			}
			tile
		} else {
			let mut tile = Vec::with_capacity(w * h * 4);
			for yy in y..y + h {
				for xx in x..x + w {
					let p = self.image.get(xx, yy).expect("rect within image bounds").mask(lazyness);
					tile.extend_from_slice(&p.to_bytes());
				}
			}
			tile
		};

		match self.cache.write(&reconstructed)? {
			Some(index) => {
				self.commands.append_bit(true);
				self.commands.append_bits(index as u32, self.index_bits);
			}
			None => {
				self.commands.append_bit(false);
				if approximable {
					self.commands.append_bit(true);
					self.colors.append_byte(fill.x);
					self.colors.append_byte(fill.y);
					self.colors.append_byte(fill.z);
					self.colors.append_byte(fill.a);
				} else {
					self.commands.append_bit(false);
					for chunk in reconstructed.chunks_exact(4) {
						self.colors.append_byte(chunk[0]);
						self.colors.append_byte(chunk[1]);
						self.colors.append_byte(chunk[2]);
						self.colors.append_byte(chunk[3]);
					}
				}
			}
		}
		Ok(())
	}
}
