//! Carry-less adaptive range coder.
//!
//! This is the variant commonly attributed to Dmitry Subbotin: a byte-wise
//! arithmetic coder that avoids carry propagation by clamping `range` near
//! the top of the interval instead of deferring carries. The model is a
//! straightforward order-0 or order-1 frequency table with periodic
//! rescaling, adapted online as symbols are coded.

use crate::bitbuffer::BitBuffer;
use crate::error::{Error, Result};

const TOP: u32 = 1 << 24;
const BOTTOM: u32 = 1 << 16;
/// Frequency increment applied to a symbol each time it is coded.
const FREQ_STEP: u32 = 32;
/// Rescale threshold: once a context's total frequency reaches this, every
/// frequency in that context is halved (floored to 1).
const RESCALE_THRESHOLD: u32 = 0xFFFF;

/// Markov chain order of the context model: 0 is a single shared table,
/// 1 conditions on the immediately preceding symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
	/// A single, context-free frequency table.
	Zero,
	/// One frequency table per previous symbol.
	One,
}

impl Order {
	fn as_exponent(self) -> u32 {
		match self {
			Order::Zero => 0,
			Order::One => 1,
		}
	}
}

/// Symbol alphabet width: 1-bit symbols for the quadtree's command stream,
/// 8-bit symbols for its pixel/color stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolWidth {
	/// One-bit symbols (two-entry alphabet).
	One,
	/// Eight-bit symbols (byte alphabet).
	Eight,
}

impl SymbolWidth {
	fn as_bits(self) -> u32 {
		match self {
			SymbolWidth::One => 1,
			SymbolWidth::Eight => 8,
		}
	}
}

/// Adaptive range coder state: the frequency model plus the configuration
/// (`order`, `bits`) it was built with.
///
/// A single instance is used for exactly one direction (encode or decode)
/// of exactly one stream; the model adapts as symbols pass through it, so
/// encoder and decoder must be constructed with identical parameters and
/// fed symbols in the same order to stay in sync.
#[derive(Debug, Clone)]
pub struct RangeCoder {
	order: Order,
	bits: u32,
	symbols: u32,
	fsize: usize,
	tsize: usize,
	freqs: Vec<u32>,
	totals: Vec<u32>,
}

impl RangeCoder {
	/// Creates a new range coder with a freshly reset model.
	pub fn new(order: Order, bits: SymbolWidth) -> Self {
		let bits = bits.as_bits();
		let symbols = 1 << bits;
		let fsize = 1usize << (bits * (order.as_exponent() + 1));
		let tsize = 1usize << (bits * order.as_exponent());

		Self {
			order,
			bits,
			symbols,
			fsize,
			tsize,
			freqs: vec![1; fsize],
			totals: vec![symbols; tsize],
		}
	}

	/// Resets the frequency model to its initial, uniform state. Used
	/// between independent streams (e.g. `commands` vs `colors`) and
	/// between key frames in a video sequence.
	pub fn reset(&mut self) {
		self.freqs.fill(1);
		self.totals.fill(self.symbols);
	}

	fn read_symbol(&self, input: &mut BitBuffer) -> Result<u32> {
		if self.bits == 8 {
			input.read_byte().map(u32::from)
		} else {
			input.read_bits(self.bits)
		}
	}

	fn write_symbol(&self, output: &mut BitBuffer, symbol: u32) -> Result<()> {
		if self.bits == 8 {
			output.append_byte(symbol as u8);
		} else {
			output.append_bits(symbol, self.bits);
		}
		Ok(())
	}

	fn context_mask(&self) -> usize {
		self.fsize - 1
	}

	/// Updates the frequency model after coding `symbol` in context base
	/// `idx` (`idx == ctx * self.symbols`), rescaling if the context's
	/// total has grown past [`RESCALE_THRESHOLD`].
	fn update_model(&mut self, idx: usize, symbol: usize, ctx: usize) {
		self.freqs[idx + symbol] += FREQ_STEP;
		self.totals[ctx] += FREQ_STEP;

		if self.totals[ctx] >= RESCALE_THRESHOLD {
			let mut sum = 0;
			for i in 0..self.symbols as usize {
				let f = &mut self.freqs[idx + i];
				*f /= 2;
				if *f == 0 {
					*f = 1;
				}
				sum += *f;
			}
			self.totals[ctx] = sum;
		}
	}

	/// Entropy-codes exactly `symbol_count` symbols read from `input` (an
	/// already-populated plaintext stream) into `output` as range-coded
	/// bytes.
	pub fn encode(
		&mut self,
		input: &mut BitBuffer,
		symbol_count: usize,
		output: &mut BitBuffer,
	) -> Result<()> {
		let mask = self.context_mask();
		let mut low: u32 = 0;
		let mut range: u32 = u32::MAX;
		let mut idx: usize = 0;

		for _ in 0..symbol_count {
			let symbol = self.read_symbol(input)? as usize;

			let start: u32 = self.freqs[idx..idx + symbol].iter().sum();
			let size = self.freqs[idx + symbol];
			let ctx = idx >> self.bits;
			let total = self.totals[ctx];

			range /= total;
			low = low.wrapping_add(start.wrapping_mul(range));
			range = range.wrapping_mul(size);

			Self::renormalize_encode(&mut low, &mut range, output);

			self.update_model(idx, symbol, ctx);
			idx = ((idx + symbol) << self.bits) & mask;
		}

		for _ in 0..4 {
			output.append_byte((low >> 24) as u8);
			low <<= 8;
		}

		Ok(())
	}

	fn renormalize_encode(low: &mut u32, range: &mut u32, output: &mut BitBuffer) {
		while (*low ^ low.wrapping_add(*range)) < TOP || *range < BOTTOM {
			if *range < BOTTOM && (*low ^ low.wrapping_add(*range)) >= TOP {
				*range = 0u32.wrapping_sub(*low) & (BOTTOM - 1);
			}

			output.append_byte((*low >> 24) as u8);
			*low <<= 8;
			*range <<= 8;
		}
	}

	/// Decodes exactly `symbol_count` symbols from the range-coded byte
	/// stream `input`, writing them back out as a plaintext stream in
	/// `output`.
	pub fn decode(
		&mut self,
		input: &mut BitBuffer,
		symbol_count: usize,
		output: &mut BitBuffer,
	) -> Result<()> {
		let mask = self.context_mask();
		let mut low: u32 = 0;
		let mut range: u32 = u32::MAX;
		let mut code: u32 = 0;

		for _ in 0..4 {
			code = (code << 8) | u32::from(input.read_byte().map_err(|_| Error::Truncated {
				context: "reading the range coder's initial code word",
			})?);
		}

		let mut idx: usize = 0;

		for _ in 0..symbol_count {
			let ctx = idx >> self.bits;
			let total = self.totals[ctx];
			let scaled_range = range / total;
			if scaled_range == 0 {
				return Err(Error::DecodeError);
			}

			let value = code.wrapping_sub(low) / scaled_range;

			let mut acc = 0u32;
			let mut symbol = None;
			for s in 0..self.symbols as usize {
				let f = self.freqs[idx + s];
				if value < acc + f {
					symbol = Some((s, acc));
					break;
				}
				acc += f;
			}
			let (symbol, start) = symbol.ok_or(Error::DecodeError)?;
			let size = self.freqs[idx + symbol];

			range = scaled_range;
			low = low.wrapping_add(start.wrapping_mul(range));
			range = range.wrapping_mul(size);

			Self::renormalize_decode(&mut low, &mut range, &mut code, input)?;

			self.write_symbol(output, symbol as u32)?;
			self.update_model(idx, symbol, ctx);
			idx = ((idx + symbol) << self.bits) & mask;
		}

		Ok(())
	}

	fn renormalize_decode(
		low: &mut u32,
		range: &mut u32,
		code: &mut u32,
		input: &mut BitBuffer,
	) -> Result<()> {
		while (*low ^ low.wrapping_add(*range)) < TOP || *range < BOTTOM {
			if *range < BOTTOM && (*low ^ low.wrapping_add(*range)) >= TOP {
				*range = 0u32.wrapping_sub(*low) & (BOTTOM - 1);
			}

			let byte = input.read_byte().map_err(|_| Error::Truncated {
				context: "reading a renormalization byte from the range-coded stream",
			})?;
			*code = (*code << 8) | u32::from(byte);
			*low <<= 8;
			*range <<= 8;
		}
		Ok(())
	}
}
