//! Flat binary form of a bag.
//!
//! Layout of one bag, recursively:
//!
//! ```text
//! int32 count
//! count x { int32 tag ; body }
//!   Int    : int32
//!   Double : float64
//!   Blob   : int32 len ; len bytes
//!   List   : nested bag layout, no length prefix
//!   String : int32 len ; len bytes, NUL included in len
//! ```
//!
//! Fields use [`Endianness::NATIVE`] unless the options pick an order.

use tracing::trace;

use crate::bag::bytes::Cursor;
use crate::bag::{Bag, BagError, Endianness, Kind, Result, Value};

/// Depth ceiling shared by the encoder, decoder, and parser defaults.
pub(crate) const DEFAULT_MAX_DEPTH: u32 = 64;

/// Byte order and nesting limit for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
	/// Byte order of every int32 and float64 field.
	pub endianness: Endianness,
	/// Maximum bag nesting depth, counting the top-level bag.
	///
	/// Keep this no larger than the reader's [`DecodeOptions::max_depth`] so
	/// every encoded bag decodes.
	pub max_depth: u32,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			endianness: Endianness::NATIVE,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl EncodeOptions {
	/// Default limits writing the given byte order.
	pub fn with_endianness(endianness: Endianness) -> Self {
		Self {
			endianness,
			..Self::default()
		}
	}
}

/// Byte order and safety limits for decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
	/// Byte order of every int32 and float64 field.
	pub endianness: Endianness,
	/// Maximum bag nesting depth, counting the top-level bag.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			endianness: Endianness::NATIVE,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl DecodeOptions {
	/// Default limits reading the given byte order.
	pub fn with_endianness(endianness: Endianness) -> Self {
		Self {
			endianness,
			..Self::default()
		}
	}
}

/// Compute the encoded size of `bag` without writing anything.
///
/// Fails for the same trees [`encode`] rejects with default options.
pub fn binary_size(bag: &Bag) -> Result<usize> {
	measure(bag, &EncodeOptions::default())
}

/// Encode `bag` into `out`, which must hold at least [`binary_size`] bytes.
///
/// Returns the number of bytes written.
pub fn encode_into(bag: &Bag, out: &mut [u8], opt: &EncodeOptions) -> Result<usize> {
	let need = measure(bag, opt)?;
	if out.len() < need {
		return Err(BagError::BufferTooSmall { need, have: out.len() });
	}
	write_measured(bag, out, opt)
}

/// Encode `bag` into a freshly allocated buffer of exactly the encoded size.
pub fn encode(bag: &Bag, opt: &EncodeOptions) -> Result<Vec<u8>> {
	let mut out = vec![0_u8; measure(bag, opt)?];
	let written = write_measured(bag, &mut out, opt)?;
	out.truncate(written);
	Ok(out)
}

/// Measure pass.
pub(crate) fn measure(bag: &Bag, opt: &EncodeOptions) -> Result<usize> {
	let mut sink = Sink::measure(opt);
	fill(bag, &mut sink, 0)?;
	Ok(sink.pos)
}

/// Write pass into a buffer already sized by [`measure`].
pub(crate) fn write_measured(bag: &Bag, out: &mut [u8], opt: &EncodeOptions) -> Result<usize> {
	let mut sink = Sink::write(out, opt);
	fill(bag, &mut sink, 0)?;
	Ok(sink.pos)
}

/// Decode one bag that spans all of `bytes`.
pub fn decode(bytes: &[u8], opt: &DecodeOptions) -> Result<Bag> {
	let mut bag = Bag::new();
	decode_into(&mut bag, bytes, opt)?;
	Ok(bag)
}

/// Clear `bag` and decode `bytes` into it.
///
/// Trailing unread bytes are a [`BagError::SizeMismatch`]. On any error the
/// bag keeps the elements decoded so far and should be discarded or cleared.
pub fn decode_into(bag: &mut Bag, bytes: &[u8], opt: &DecodeOptions) -> Result<()> {
	bag.clear();
	let mut cursor = Cursor::new(bytes);
	reconstruct(&mut cursor, bag, opt, 0)?;

	if cursor.pos() != bytes.len() {
		return Err(BagError::SizeMismatch {
			expected: bytes.len(),
			consumed: cursor.pos(),
		});
	}
	Ok(())
}

/// Byte destination shared by the measure and write passes.
///
/// With no buffer attached only the position advances.
struct Sink<'a> {
	out: Option<&'a mut [u8]>,
	pos: usize,
	endianness: Endianness,
	max_depth: u32,
}

impl<'a> Sink<'a> {
	fn measure(opt: &EncodeOptions) -> Self {
		Self {
			out: None,
			pos: 0,
			endianness: opt.endianness,
			max_depth: opt.max_depth,
		}
	}

	fn write(out: &'a mut [u8], opt: &EncodeOptions) -> Self {
		Self {
			out: Some(out),
			pos: 0,
			endianness: opt.endianness,
			max_depth: opt.max_depth,
		}
	}

	fn put(&mut self, bytes: &[u8]) -> Result<()> {
		let end = self.pos + bytes.len();
		if let Some(out) = self.out.as_deref_mut() {
			let have = out.len();
			let dst = out.get_mut(self.pos..end).ok_or(BagError::BufferTooSmall { need: end, have })?;
			dst.copy_from_slice(bytes);
		}
		self.pos = end;
		Ok(())
	}

	fn put_i32(&mut self, value: i32) -> Result<()> {
		let bytes = self.endianness.i32_bytes(value);
		self.put(&bytes)
	}

	fn put_f64(&mut self, value: f64) -> Result<()> {
		let bytes = self.endianness.f64_bytes(value);
		self.put(&bytes)
	}

	fn put_len(&mut self, len: usize) -> Result<()> {
		self.put_i32(wire_len(len)?)
	}
}

fn wire_len(len: usize) -> Result<i32> {
	i32::try_from(len).map_err(|_| BagError::LengthOverflow { len })
}

fn fill(bag: &Bag, sink: &mut Sink<'_>, depth: u32) -> Result<()> {
	if depth >= sink.max_depth {
		return Err(BagError::EncodeDepthExceeded { max_depth: sink.max_depth });
	}

	sink.put_len(bag.len())?;
	for value in bag {
		let kind = value.kind().ok_or(BagError::EncodeEmptyValue)?;
		sink.put_i32(kind.tag())?;
		match value {
			Value::Empty => return Err(BagError::EncodeEmptyValue),
			Value::Int(item) => sink.put_i32(*item)?,
			Value::Double(item) => sink.put_f64(*item)?,
			Value::Blob(bytes) => {
				sink.put_len(bytes.len())?;
				sink.put(bytes)?;
			}
			Value::List(inner) => fill(inner, sink, depth + 1)?,
			Value::String(bytes) => {
				if let Some(at) = bytes.iter().position(|byte| *byte == 0) {
					return Err(BagError::InteriorNul { at });
				}
				sink.put_len(bytes.len() + 1)?;
				sink.put(bytes)?;
				sink.put(&[0])?;
			}
		}
	}
	Ok(())
}

fn reconstruct(cursor: &mut Cursor<'_>, bag: &mut Bag, opt: &DecodeOptions, depth: u32) -> Result<()> {
	if depth >= opt.max_depth {
		return Err(BagError::DecodeDepthExceeded { max_depth: opt.max_depth });
	}

	let at = cursor.pos();
	let count = cursor.read_i32(opt.endianness)?;
	let count = usize::try_from(count).map_err(|_| BagError::NegativeCount { count, at })?;
	trace!(at, count, depth, "decoding bag");

	for _ in 0..count {
		let at = cursor.pos();
		let tag = cursor.read_i32(opt.endianness)?;
		let kind = Kind::from_tag(tag).ok_or(BagError::UnknownTag { tag, at })?;
		match kind {
			Kind::Int => bag.add_int(cursor.read_i32(opt.endianness)?),
			Kind::Double => bag.add_double(cursor.read_f64(opt.endianness)?),
			Kind::Blob => {
				let len = cursor.read_len(opt.endianness)?;
				bag.add_blob(cursor.read_exact(len)?);
			}
			Kind::List => {
				let inner = bag.add_list();
				reconstruct(cursor, inner, opt, depth + 1)?;
			}
			Kind::String => {
				let len = cursor.read_len(opt.endianness)?;
				let body_at = cursor.pos();
				let body = cursor.read_exact(len)?;
				let Some((&0, text)) = body.split_last() else {
					return Err(BagError::UnterminatedString { at: body_at });
				};
				bag.add_string(text);
			}
		}
	}
	Ok(())
}
