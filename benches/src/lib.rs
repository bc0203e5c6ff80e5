//! Benchmark helper utilities for `qtrc`
//!
//! This module provides synthetic image generators shared by the range
//! coder and quadtree codec benchmarks, so every benchmark exercises
//! the same handful of representative workloads instead of hand-rolling
//! test data per file.

use qtrc_core::image::{Image, Pixel};

/// Common benchmark image sizes.
pub mod sizes {
	/// Tiny image: 64x64 (4,096 pixels)
	pub const TINY: (usize, usize) = (64, 64);
	/// Small image: 256x256 (65,536 pixels)
	pub const SMALL: (usize, usize) = (256, 256);
	/// Medium image: 512x512 (262,144 pixels)
	pub const MEDIUM: (usize, usize) = (512, 512);
	/// Large image: 1024x768 (786,432 pixels) - typical screen capture tile
	pub const LARGE: (usize, usize) = (1024, 768);
}

/// A uniform image, the quadtree codec's best case: it collapses to a
/// single root-level leaf regardless of size.
pub fn solid_image(width: usize, height: usize, fill: Pixel) -> Image {
	Image::from_pixels(width, height, vec![fill; width * height], false).unwrap()
}

/// A checkerboard of two colors at a given cell size, the codec's worst
/// case for a zero-error budget: every cell boundary forces a split.
pub fn checkerboard_image(width: usize, height: usize, cell: usize) -> Image {
	let mut pixels = Vec::with_capacity(width * height);
	for y in 0..height {
		for x in 0..width {
			let on = (x / cell + y / cell) % 2 == 0;
			pixels.push(if on { Pixel::rgb(255, 255, 255) } else { Pixel::rgb(0, 0, 0) });
		}
	}
	Image::from_pixels(width, height, pixels, false).unwrap()
}

/// A smooth horizontal gradient: low per-pixel variance within a block,
/// but no two blocks identical, so the tile cache never hits.
pub fn gradient_image(width: usize, height: usize) -> Image {
	let pixels = (0..width * height)
		.map(|i| {
			let x = i % width;
			let v = ((x * 255) / width.max(1)) as u8;
			Pixel::rgb(v, v, v)
		})
		.collect();
	Image::from_pixels(width, height, pixels, false).unwrap()
}

/// Pseudo-random noise, the range coder's worst case: no context
/// carries useful information about the next symbol. Uses a small
/// xorshift generator rather than pulling in a full RNG dependency for
/// deterministic, allocation-free sample generation.
pub fn noise_image(width: usize, height: usize, seed: u64) -> Image {
	let mut state = seed | 1;
	let mut next_byte = move || {
		state ^= state << 13;
		state ^= state >> 7;
		state ^= state << 17;
		(state & 0xFF) as u8
	};
	let pixels =
		(0..width * height).map(|_| Pixel::rgb(next_byte(), next_byte(), next_byte())).collect();
	Image::from_pixels(width, height, pixels, false).unwrap()
}

/// A frame made of `tiles_per_side^2` repeated `tile`x`tile` blocks,
/// exercising the tile cache's hit path: every block after the first is
/// a guaranteed cache hit.
pub fn repeated_tiles_image(tile: usize, tiles_per_side: usize) -> Image {
	let side = tile * tiles_per_side;
	let unit: Vec<Pixel> =
		(0..tile * tile).map(|i| Pixel::rgb((i % 251) as u8, (i % 37) as u8, (i % 13) as u8)).collect();

	let mut pixels = vec![Pixel::default(); side * side];
	for ty in 0..tiles_per_side {
		for tx in 0..tiles_per_side {
			for y in 0..tile {
				for x in 0..tile {
					let dst = (ty * tile + y) * side + tx * tile + x;
					pixels[dst] = unit[y * tile + x];
				}
			}
		}
	}
	Image::from_pixels(side, side, pixels, false).unwrap()
}

/// A sequence of `frames` images depicting a solid box sliding across an
/// otherwise static background, the representative workload for
/// reference-frame delta coding: each frame differs from the last only
/// inside a small moving region.
pub fn sliding_box_sequence(width: usize, height: usize, frames: usize) -> Vec<Image> {
	let box_size = (width.min(height) / 8).max(1);
	(0..frames)
		.map(|f| {
			let offset = (f * 4) % width.max(1);
			let mut pixels = vec![Pixel::rgb(20, 20, 20); width * height];
			for y in 0..box_size.min(height) {
				for x in 0..box_size {
					let px = (offset + x) % width.max(1);
					pixels[y * width + px] = Pixel::rgb(250, 10, 10);
				}
			}
			Image::from_pixels(width, height, pixels, false).unwrap()
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn solid_image_is_uniform() {
		let image = solid_image(8, 8, Pixel::rgb(1, 2, 3));
		assert!(image.pixels().iter().all(|&p| p == Pixel::rgb(1, 2, 3)));
	}

	#[test]
	fn checkerboard_alternates_by_cell() {
		let image = checkerboard_image(4, 4, 1);
		assert_ne!(image.get(0, 0).unwrap(), image.get(1, 0).unwrap());
	}

	#[test]
	fn repeated_tiles_image_produces_identical_quadrants() {
		let image = repeated_tiles_image(4, 2);
		let first: Vec<_> =
			(0..4).flat_map(|y| (0..4).map(move |x| (x, y))).map(|(x, y)| image.get(x, y).unwrap()).collect();
		let second: Vec<_> = (0..4)
			.flat_map(|y| (0..4).map(move |x| (x + 4, y)))
			.map(|(x, y)| image.get(x, y).unwrap())
			.collect();
		assert_eq!(first, second);
	}

	#[test]
	fn sliding_box_sequence_has_requested_length() {
		let frames = sliding_box_sequence(32, 32, 5);
		assert_eq!(frames.len(), 5);
	}
}
