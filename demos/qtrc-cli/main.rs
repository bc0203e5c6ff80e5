//! `qtrc` command-line front end.
//!
//! A thin wrapper around the `qtrc` library: it loads pixels through the
//! `image` crate, hands them to the quadtree codec, and frames the
//! result with the on-disk container. The codec itself has no opinion
//! on file formats, CLI parsing, or logging — all three live here.
//!
//! # Usage
//!
//! ```bash
//! qtrc-cli encode input.png output.qtz --maxerror 0 --minsize 1
//! qtrc-cli decode output.qtz restored.png
//! qtrc-cli bench-coder --width 512 --height 512
//! ```

use clap::{Parser, Subcommand};
use image::{ImageBuffer, Rgba, RgbaImage};
use qtrc::config::CodecConfig;
use qtrc::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qtrc-cli")]
#[command(author = "qtrc project")]
#[command(version)]
#[command(about = "Quadtree/range-coder image codec — encode, decode, and bench", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a PNG/BMP file into a `.qtz` container.
	Encode {
		/// Input image path (any format the `image` crate decodes).
		input: PathBuf,
		/// Output `.qtz` container path.
		output: PathBuf,
		/// Path to a TOML config file overriding the built-in defaults.
		#[arg(short, long)]
		config: Option<PathBuf>,
		/// Per-pixel error tolerance; `0` is lossless. Overrides config.
		#[arg(long)]
		maxerror: Option<u16>,
		/// Smallest allowed leaf edge, a power of two. Overrides config.
		#[arg(long)]
		minsize: Option<usize>,
		/// Low bits masked off each channel (`0..=7`). Overrides config.
		#[arg(long)]
		lazyness: Option<u8>,
		/// Apply the reversible YCoCg transform before coding.
		#[arg(short, long)]
		transform: bool,
	},

	/// Decode a `.qtz` container back into a PNG/BMP file.
	Decode {
		/// Input `.qtz` container path.
		input: PathBuf,
		/// Output image path; its extension selects the format.
		output: PathBuf,
	},

	/// Round-trip a synthetic image and print size/timing stats without
	/// touching the filesystem, as a quick sanity check distinct from
	/// the `criterion` benchmarks under `benches/`.
	BenchCoder {
		/// Width of the synthetic test image.
		#[arg(long, default_value_t = 512)]
		width: usize,
		/// Height of the synthetic test image.
		#[arg(long, default_value_t = 512)]
		height: usize,
	},

	/// Print a `.qtz` container's metadata as JSON without decoding the
	/// pixel data.
	Inspect {
		/// Input `.qtz` container path.
		input: PathBuf,
	},
}

/// JSON-serializable summary of a `.qtz` container, printed by
/// [`Commands::Inspect`].
#[derive(Serialize)]
struct ContainerSummary {
	width: usize,
	height: usize,
	minsize: usize,
	maxdepth: i32,
	transform: bool,
	cache_size: usize,
	commands_bits: usize,
	colors_bits: usize,
	total_bytes: usize,
}

fn load_image(path: &PathBuf) -> anyhow::Result<Image> {
	let decoded = image::open(path)?.to_rgba8();
	let (width, height) = decoded.dimensions();
	let pixels = decoded
		.pixels()
		.map(|Rgba([r, g, b, a])| Pixel::rgba(*r, *g, *b, *a))
		.collect();
	Ok(Image::from_pixels(width as usize, height as usize, pixels, true)?)
}

fn save_image(path: &PathBuf, image: &Image) -> anyhow::Result<()> {
	let mut buffer: RgbaImage = ImageBuffer::new(image.width() as u32, image.height() as u32);
	for y in 0..image.height() {
		for x in 0..image.width() {
			let p = image.get(x, y)?;
			buffer.put_pixel(x as u32, y as u32, Rgba([p.x, p.y, p.z, p.a]));
		}
	}
	buffer.save(path)?;
	Ok(())
}

fn run_encode(
	input: PathBuf,
	output: PathBuf,
	config: Option<PathBuf>,
	maxerror: Option<u16>,
	minsize: Option<usize>,
	lazyness: Option<u8>,
	transform: bool,
) -> anyhow::Result<()> {
	let mut cfg = CodecConfig::load(config.as_deref())?;
	if let Some(v) = maxerror {
		cfg.maxerror = v;
	}
	if let Some(v) = minsize {
		cfg.minsize = v;
	}
	if let Some(v) = lazyness {
		cfg.lazyness = v;
	}
	cfg.validate()?;

	log::info!("loading {}", input.display());
	let loaded = load_image(&input)?;
	let image = if transform { loaded.to_ycocg() } else { loaded };

	let mut cache = TileCache::new(cfg.cache_size, image.width() * image.height() * 4)?;
	let params = cfg.to_params();

	let start = Instant::now();
	let qti = compress(&image, None, &mut cache, &params)?;
	let bytes = container::encode(&qti, transform, cfg.lazyness, cache.capacity())?;
	let elapsed = start.elapsed();

	let original_bytes = image.width() * image.height() * 4;
	log::info!(
		"encoded {}x{} ({} bytes raw -> {} bytes, {:.1}% of original) in {:?}",
		image.width(),
		image.height(),
		original_bytes,
		bytes.len(),
		(bytes.len() as f64 / original_bytes as f64) * 100.0,
		elapsed
	);

	std::fs::write(&output, &bytes)?;
	println!("wrote {}", output.display());
	Ok(())
}

fn run_decode(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
	log::info!("loading {}", input.display());
	let bytes = std::fs::read(&input)?;
	let (qti, transform, cache_size) = container::decode(&bytes)?;

	let mut cache = TileCache::new(cache_size, qti.width * qti.height * 4)?;
	let decoded = decompress(&qti, None, &mut cache)?;
	let image = if transform { decoded.from_ycocg() } else { decoded };

	save_image(&output, &image)?;
	println!("wrote {}", output.display());
	Ok(())
}

fn run_bench_coder(width: usize, height: usize) -> anyhow::Result<()> {
	let pixels =
		(0..width * height).map(|i| Pixel::rgb((i % 256) as u8, ((i / 7) % 256) as u8, ((i / 13) % 256) as u8)).collect();
	let image = Image::from_pixels(width, height, pixels, false)?;

	let params = QuadtreeParams { maxerror: 0, minsize: 1, maxdepth: -1, lazyness: 0 };
	let max_tile_bytes = width * height * 4;
	let mut cache = TileCache::new(256, max_tile_bytes)?;

	let start = Instant::now();
	let qti = compress(&image, None, &mut cache, &params)?;
	let encode_time = start.elapsed();

	let mut cache = TileCache::new(256, max_tile_bytes)?;
	let start = Instant::now();
	let decoded = decompress(&qti, None, &mut cache)?;
	let decode_time = start.elapsed();

	assert_eq!(decoded.pixels(), image.pixels(), "bench-coder round trip must be lossless");

	let raw_bytes = width * height * 4;
	let coded_bits = qti.commands.size() + qti.colors.size();
	println!("image: {width}x{height} ({raw_bytes} bytes raw)");
	println!("quadtree streams: {} bits ({:.1}% of raw)", coded_bits, (coded_bits / 8) as f64 / raw_bytes as f64 * 100.0);
	println!("encode: {encode_time:?}, decode: {decode_time:?}");
	Ok(())
}

fn run_inspect(input: PathBuf) -> anyhow::Result<()> {
	let bytes = std::fs::read(&input)?;
	let total_bytes = bytes.len();
	let (qti, transform, cache_size) = container::decode(&bytes)?;

	let summary = ContainerSummary {
		width: qti.width,
		height: qti.height,
		minsize: qti.minsize,
		maxdepth: qti.maxdepth,
		transform,
		cache_size,
		commands_bits: qti.commands.size(),
		colors_bits: qti.colors.size(),
		total_bytes,
	};
	println!("{}", serde_json::to_string_pretty(&summary)?);
	Ok(())
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Commands::Encode { input, output, config, maxerror, minsize, lazyness, transform } => {
			run_encode(input, output, config, maxerror, minsize, lazyness, transform)
		}
		Commands::Decode { input, output } => run_decode(input, output),
		Commands::BenchCoder { width, height } => run_bench_coder(width, height),
		Commands::Inspect { input } => run_inspect(input),
	}
}
