//! Benchmark suite for the adaptive range coder
//!
//! Measures encode/decode throughput under the two context orders and
//! symbol widths the quadtree codec actually uses, plus the model's
//! convergence toward the entropy of a skewed distribution.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench range_coder

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use qtrc_core::bitbuffer::BitBuffer;
use qtrc_core::rangecoder::{Order, RangeCoder, SymbolWidth};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn skewed_byte_stream(n: usize, p_zero: f64, seed: u64) -> Vec<u32> {
	let mut rng = SmallRng::seed_from_u64(seed);
	(0..n).map(|_| if rng.random::<f64>() < p_zero { 0 } else { rng.random::<u8>() as u32 }).collect()
}

fn uniform_byte_stream(n: usize, seed: u64) -> Vec<u32> {
	let mut rng = SmallRng::seed_from_u64(seed);
	(0..n).map(|_| rng.random::<u8>() as u32).collect()
}

fn plaintext_bytes(symbols: &[u32]) -> BitBuffer {
	let mut buf = BitBuffer::new();
	for &s in symbols {
		buf.append_byte(s as u8);
	}
	buf
}

fn bench_encode_throughput(c: &mut Criterion) {
	let mut group = c.benchmark_group("range_coder_encode");

	let sizes = [10_000usize, 100_000];
	for &n in &sizes {
		let skewed = skewed_byte_stream(n, 0.9, 0xC0FFEE);
		let uniform = uniform_byte_stream(n, 0xBEEF);

		group.throughput(Throughput::Elements(n as u64));
		group.bench_with_input(BenchmarkId::new("order0_skewed", n), &skewed, |b, symbols| {
			b.iter(|| {
				let mut plaintext = plaintext_bytes(symbols);
				let mut coder = RangeCoder::new(Order::Zero, SymbolWidth::Eight);
				let mut compressed = BitBuffer::new();
				coder.encode(&mut plaintext, symbols.len(), &mut compressed).unwrap();
				black_box(compressed.size())
			});
		});
		group.bench_with_input(BenchmarkId::new("order1_uniform", n), &uniform, |b, symbols| {
			b.iter(|| {
				let mut plaintext = plaintext_bytes(symbols);
				let mut coder = RangeCoder::new(Order::One, SymbolWidth::Eight);
				let mut compressed = BitBuffer::new();
				coder.encode(&mut plaintext, symbols.len(), &mut compressed).unwrap();
				black_box(compressed.size())
			});
		});
	}

	group.finish();
}

fn bench_decode_throughput(c: &mut Criterion) {
	let mut group = c.benchmark_group("range_coder_decode");

	let n = 100_000usize;
	let skewed = skewed_byte_stream(n, 0.9, 0xC0FFEE);
	let mut plaintext = plaintext_bytes(&skewed);
	let mut compressed = BitBuffer::new();
	RangeCoder::new(Order::Zero, SymbolWidth::Eight).encode(&mut plaintext, n, &mut compressed).unwrap();

	group.throughput(Throughput::Elements(n as u64));
	group.bench_function("order0_skewed", |b| {
		b.iter(|| {
			let mut input = compressed.clone();
			input.rewind();
			let mut coder = RangeCoder::new(Order::Zero, SymbolWidth::Eight);
			let mut output = BitBuffer::new();
			coder.decode(&mut input, n, &mut output).unwrap();
			black_box(output.size())
		});
	});

	group.finish();
}

/// Scenario: 100,000 symbols from a 0.9/0.1 Bernoulli source through an
/// order-0 bits=8 coder should land within 5% of the source's entropy
/// once the model has adapted; tracked here as a benchmark so regressions
/// in model adaptation show up as a compression-ratio regression, not
/// just a speed one.
fn bench_entropy_convergence(c: &mut Criterion) {
	let mut group = c.benchmark_group("range_coder_entropy");
	group.sample_size(20);

	let n = 100_000usize;
	let symbols = skewed_byte_stream(n, 0.9, 0xC0FFEE);
	let entropy_bits = -(0.9 * 0.9f64.log2() + 0.1 * 0.1f64.log2()) * n as f64;

	group.bench_function("order0_skewed_compression_ratio", |b| {
		b.iter(|| {
			let mut plaintext = plaintext_bytes(&symbols);
			let mut coder = RangeCoder::new(Order::Zero, SymbolWidth::Eight);
			let mut compressed = BitBuffer::new();
			coder.encode(&mut plaintext, n, &mut compressed).unwrap();
			black_box(compressed.size())
		});
	});

	let mut plaintext = plaintext_bytes(&symbols);
	let mut coder = RangeCoder::new(Order::Zero, SymbolWidth::Eight);
	let mut compressed = BitBuffer::new();
	coder.encode(&mut plaintext, n, &mut compressed).unwrap();
	println!(
		"\nentropy convergence: produced {} bits, theoretical entropy {:.0} bits ({:.1}% overhead)",
		compressed.size(),
		entropy_bits,
		(compressed.size() as f64 / entropy_bits - 1.0) * 100.0
	);

	group.finish();
}

criterion_group!(benches, bench_encode_throughput, bench_decode_throughput, bench_entropy_convergence);
criterion_main!(benches);
