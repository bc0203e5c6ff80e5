//! Recursive decoder half of the quadtree codec, mirroring
//! [`super::encode`] node for node.

use super::{Qti, bits_for_count};
use crate::bitbuffer::BitBuffer;
use crate::error::Result;
use crate::image::{Image, Pixel};
use crate::tilecache::TileCache;

pub(crate) fn run(qti: &Qti, cache: &mut TileCache) -> Result<Image> {
	let mut commands = qti.commands.clone();
	let mut colors = qti.colors.clone();
	commands.rewind();
	colors.rewind();

	let mut state = DecodeState {
		commands,
		colors,
		cache,
		index_bits: bits_for_count(cache.capacity()),
		minsize: qti.minsize,
		maxdepth: qti.maxdepth,
		image: Image::new(qti.width, qti.height, false)?,
	};
	state.node(0, 0, qti.width, qti.height, 0)?;
	Ok(state.image)
}

struct DecodeState<'a> {
	commands: BitBuffer,
	colors: BitBuffer,
	cache: &'a mut TileCache,
	index_bits: u32,
	minsize: usize,
	maxdepth: i32,
	image: Image,
}

fn is_forced(minsize: usize, maxdepth: i32, w: usize, h: usize, depth: i32) -> bool {
	(w <= minsize && h <= minsize) || (maxdepth >= 0 && depth >= maxdepth)
}

impl DecodeState<'_> {
	fn node(&mut self, x: usize, y: usize, w: usize, h: usize, depth: i32) -> Result<()> {
		if w == 0 || h == 0 {
			return Ok(());
		}

		if is_forced(self.minsize, self.maxdepth, w, h, depth) {
			return self.leaf(x, y, w, h);
		}

		let split = self.commands.read_bit()?;
		if !split {
			return self.leaf(x, y, w, h);
		}

		let left_w = w / 2;
		let right_w = w - left_w;
		let top_h = h / 2;
		let bottom_h = h - top_h;

		self.node(x, y, left_w, top_h, depth + 1)?;
		self.node(x + left_w, y, right_w, top_h, depth + 1)?;
		self.node(x, y + top_h, left_w, bottom_h, depth + 1)?;
		self.node(x + left_w, y + top_h, right_w, bottom_h, depth + 1)
	}

	fn read_pixel(&mut self) -> Result<Pixel> {
		Ok(Pixel {
			x: self.colors.read_byte()?,
			y: self.colors.read_byte()?,
			z: self.colors.read_byte()?,
			a: self.colors.read_byte()?,
		})
	}

	fn leaf(&mut self, x: usize, y: usize, w: usize, h: usize) -> Result<()> {
		if w == 1 && h == 1 {
			let pixel = self.read_pixel()?;
			self.image.set(x, y, pixel)?;
			return Ok(());
		}

		let cache_hit = self.commands.read_bit()?;
		if cache_hit {
			let index = self.commands.read_bits(self.index_bits)? as usize;
			let tile = self.cache.get(index)?.to_vec();
			self.fill_rect(x, y, w, h, &tile)?;
			return Ok(());
		}

		let uniform = self.commands.read_bit()?;
		if uniform {
			let fill = self.read_pixel()?;
			let bytes = fill.to_bytes();
			let mut tile = Vec::with_capacity(w * h * 4);
			for _ in 0..w * h {
				tile.extend_from_slice(&bytes);
			}
			self.fill_rect(x, y, w, h, &tile)?;
			self.cache.install(&tile);
		} else {
			let mut tile = Vec::with_capacity(w * h * 4);
			for yy in y..y + h {
				for xx in x..x + w {
					let pixel = self.read_pixel()?;
					self.image.set(xx, yy, pixel)?;
					tile.extend_from_slice(&pixel.to_bytes());
				}
			}
			self.cache.install(&tile);
		}
		Ok(())
	}

	/// Writes a previously cached or uniform-fill tile's bytes into the
	/// output image in scan order.
	fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, tile: &[u8]) -> Result<()> {
		for (i, chunk) in tile.chunks_exact(4).enumerate() {
			let xx = x + i % w;
			let yy = y + i / w;
			self.image.set(xx, yy, Pixel::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))?;
		}
		Ok(())
	}
}
