//! Benchmark suite for the quadtree codec
//!
//! Covers compress/decompress throughput across representative image
//! content (solid fills, checkerboards, gradients, noise, repeated
//! tiles) and the reference-frame delta path used for video-like
//! sequences.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench quadtree_codec

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use qtrc_benches::{checkerboard_image, gradient_image, noise_image, sizes, sliding_box_sequence, solid_image};
use qtrc_core::image::Pixel;
use qtrc_core::quadtree::{QuadtreeParams, compress, decompress};
use qtrc_core::tilecache::TileCache;
use std::hint::black_box;

fn params() -> QuadtreeParams {
	QuadtreeParams { maxerror: 0, minsize: 1, maxdepth: -1, lazyness: 0 }
}

fn bench_compress_by_content(c: &mut Criterion) {
	let mut group = c.benchmark_group("quadtree_compress");
	let (w, h) = sizes::SMALL;
	group.throughput(Throughput::Elements((w * h) as u64));

	let solid = solid_image(w, h, Pixel::rgb(128, 64, 200));
	let checkerboard = checkerboard_image(w, h, 4);
	let gradient = gradient_image(w, h);
	let noise = noise_image(w, h, 0xC0FFEE);

	for (name, image) in [("solid", &solid), ("checkerboard", &checkerboard), ("gradient", &gradient), ("noise", &noise)]
	{
		group.bench_with_input(BenchmarkId::new("content", name), image, |b, image| {
			b.iter(|| {
				let mut cache = TileCache::new(256, w * h * 4).unwrap();
				let qti = compress(black_box(image), None, &mut cache, &params()).unwrap();
				black_box(qti.commands.size() + qti.colors.size())
			});
		});
	}

	group.finish();
}

fn bench_round_trip_by_size(c: &mut Criterion) {
	let mut group = c.benchmark_group("quadtree_round_trip");

	for &(w, h) in &[sizes::TINY, sizes::SMALL, sizes::MEDIUM] {
		let image = gradient_image(w, h);
		group.throughput(Throughput::Elements((w * h) as u64));
		group.bench_with_input(BenchmarkId::new("gradient", format!("{w}x{h}")), &image, |b, image| {
			b.iter(|| {
				let mut encode_cache = TileCache::new(256, w * h * 4).unwrap();
				let qti = compress(image, None, &mut encode_cache, &params()).unwrap();
				let mut decode_cache = TileCache::new(256, w * h * 4).unwrap();
				let decoded = decompress(&qti, None, &mut decode_cache).unwrap();
				black_box(decoded.pixels().len())
			});
		});
	}

	group.finish();
}

/// Exercises the tile cache's hit path: repeated blocks should compress
/// far faster than the equivalent unique-content image, and the tile
/// cache's FIFO eviction (see `tilecache::tests::oldest_entry_is_evicted_first`
/// for the correctness side of this) shouldn't show up as a throughput
/// cliff once the cache fills.
fn bench_cache_hit_path(c: &mut Criterion) {
	let mut group = c.benchmark_group("quadtree_tile_cache");

	let tile = qtrc_benches::repeated_tiles_image(16, 8);
	group.throughput(Throughput::Elements((tile.width() * tile.height()) as u64));
	group.bench_function("repeated_16x16_tiles", |b| {
		b.iter(|| {
			let mut cache = TileCache::new(16, 16 * 16 * 4).unwrap();
			let params = QuadtreeParams { maxerror: 0, minsize: 16, maxdepth: -1, lazyness: 0 };
			let qti = compress(&tile, None, &mut cache, &params).unwrap();
			black_box(qti.colors.size())
		});
	});

	group.finish();
}

/// Reference-frame delta coding over a moving-box sequence: each frame
/// after the first should compress to nearly nothing outside the box's
/// bounding region, since the difference image is mostly zero.
fn bench_delta_sequence(c: &mut Criterion) {
	let mut group = c.benchmark_group("quadtree_delta_sequence");

	let (w, h) = sizes::SMALL;
	let frames = sliding_box_sequence(w, h, 16);
	group.throughput(Throughput::Elements((frames.len() * w * h) as u64));

	group.bench_function("sliding_box_16_frames", |b| {
		b.iter(|| {
			let mut cache = TileCache::new(256, w * h * 4).unwrap();
			let mut total_bits = 0usize;
			let mut reference: Option<qtrc_core::image::Image> = None;
			for frame in &frames {
				let qti = compress(frame, reference.as_ref(), &mut cache, &params()).unwrap();
				total_bits += qti.commands.size() + qti.colors.size();
				reference = Some(frame.clone());
			}
			black_box(total_bits)
		});
	});

	group.finish();
}

criterion_group!(
	benches,
	bench_compress_by_content,
	bench_round_trip_by_size,
	bench_cache_hit_path,
	bench_delta_sequence
);
criterion_main!(benches);
