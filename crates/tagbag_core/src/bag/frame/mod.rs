use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::bag::binary::{self, DecodeOptions, EncodeOptions};
use crate::bag::{Bag, BagError, Endianness, Result};

/// Byte order and size limit for length-prefixed frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOptions {
	/// Byte order of the length prefix and of the encoded bag.
	pub endianness: Endianness,
	/// Largest accepted frame body in bytes.
	pub max_frame_len: usize,
	/// Maximum bag nesting depth, enforced both when writing and reading.
	pub max_depth: u32,
}

impl Default for FrameOptions {
	fn default() -> Self {
		Self {
			endianness: Endianness::NATIVE,
			max_frame_len: 64 * 1024 * 1024,
			max_depth: DecodeOptions::default().max_depth,
		}
	}
}

impl FrameOptions {
	/// Default limits using the given byte order.
	pub fn with_endianness(endianness: Endianness) -> Self {
		Self {
			endianness,
			..Self::default()
		}
	}

	fn encode_options(&self) -> EncodeOptions {
		EncodeOptions {
			endianness: self.endianness,
			max_depth: self.max_depth,
		}
	}

	fn decode_options(&self) -> DecodeOptions {
		DecodeOptions {
			endianness: self.endianness,
			max_depth: self.max_depth,
		}
	}
}

/// Two-method contract a byte transport drives to move bags.
pub trait Portable {
	/// Write this value as one frame into `sink`.
	fn write(&self, sink: &mut dyn Write) -> Result<()>;

	/// Replace this value with one frame read from `source`.
	fn read(&mut self, source: &mut dyn Read) -> Result<()>;
}

impl Portable for Bag {
	fn write(&self, sink: &mut dyn Write) -> Result<()> {
		write_frame(self, sink, &FrameOptions::default())
	}

	fn read(&mut self, source: &mut dyn Read) -> Result<()> {
		read_frame(self, source, &FrameOptions::default())
	}
}

/// Write `bag` as an int32 length prefix followed by its encoded bytes.
pub fn write_frame<W: Write + ?Sized>(bag: &Bag, sink: &mut W, opt: &FrameOptions) -> Result<()> {
	let body = binary::encode(bag, &opt.encode_options())?;
	let len = i32::try_from(body.len()).map_err(|_| BagError::LengthOverflow { len: body.len() })?;

	sink.write_all(&opt.endianness.i32_bytes(len))?;
	sink.write_all(&body)?;
	debug!(len, elements = bag.len(), "wrote frame");
	Ok(())
}

/// Clear `bag` and fill it from one frame read from `source`.
///
/// The frame body must decode to exactly its declared length. On error the
/// bag may hold a partial decode and should be discarded or cleared.
pub fn read_frame<R: Read + ?Sized>(bag: &mut Bag, source: &mut R, opt: &FrameOptions) -> Result<()> {
	bag.clear();
	let mut prefix = [0_u8; 4];
	read_full(source, &mut prefix, 0)?;
	let body = read_body(source, prefix, opt)?;
	decode_body(bag, &body, opt)
}

/// Iterator over consecutive frames of a byte source.
///
/// Ends cleanly when the source is exhausted exactly at a frame boundary.
/// After the first error no further frames are yielded.
#[derive(Debug)]
pub struct FrameReader<R> {
	source: R,
	opt: FrameOptions,
	offset: usize,
	done: bool,
}

impl<R: Read> FrameReader<R> {
	/// Read frames from `source` with `opt`.
	pub fn new(source: R, opt: FrameOptions) -> Self {
		Self {
			source,
			opt,
			offset: 0,
			done: false,
		}
	}

	/// Bytes consumed so far.
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// Return the wrapped source.
	pub fn into_inner(self) -> R {
		self.source
	}

	fn next_frame(&mut self) -> Result<Option<Bag>> {
		let mut prefix = [0_u8; 4];
		let got = read_some(&mut self.source, &mut prefix)?;
		if got == 0 {
			return Ok(None);
		}
		if got < prefix.len() {
			return Err(BagError::UnexpectedEof {
				at: self.offset + got,
				need: prefix.len() - got,
				rem: 0,
			});
		}

		let body = read_body(&mut self.source, prefix, &self.opt).map_err(|err| shift_eof(err, self.offset))?;
		let mut bag = Bag::new();
		decode_body(&mut bag, &body, &self.opt)?;
		self.offset += prefix.len() + body.len();
		Ok(Some(bag))
	}
}

impl<R: Read> Iterator for FrameReader<R> {
	type Item = Result<Bag>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		match self.next_frame() {
			Ok(Some(bag)) => Some(Ok(bag)),
			Ok(None) => {
				self.done = true;
				None
			}
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}
}

fn read_body<R: Read + ?Sized>(source: &mut R, prefix: [u8; 4], opt: &FrameOptions) -> Result<Vec<u8>> {
	let len = match opt.endianness {
		Endianness::Little => i32::from_le_bytes(prefix),
		Endianness::Big => i32::from_be_bytes(prefix),
	};
	let size = usize::try_from(len).map_err(|_| BagError::NegativeFrameLength { len })?;
	if size > opt.max_frame_len {
		return Err(BagError::FrameTooLarge {
			len: size,
			limit: opt.max_frame_len,
		});
	}

	let mut body = vec![0_u8; size];
	read_full(source, &mut body, prefix.len())?;
	debug!(len = size, "read frame body");
	Ok(body)
}

fn decode_body(bag: &mut Bag, body: &[u8], opt: &FrameOptions) -> Result<()> {
	binary::decode_into(bag, body, &opt.decode_options()).inspect_err(|err| debug!(%err, len = body.len(), "frame body failed to decode"))
}

/// Fill `buf` completely, mapping a short source to [`BagError::UnexpectedEof`].
fn read_full<R: Read + ?Sized>(source: &mut R, buf: &mut [u8], base: usize) -> Result<()> {
	let got = read_some(source, buf)?;
	if got < buf.len() {
		return Err(BagError::UnexpectedEof {
			at: base + got,
			need: buf.len() - got,
			rem: 0,
		});
	}
	Ok(())
}

/// Read until `buf` is full or the source ends, returning the byte count.
fn read_some<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
	let mut filled = 0;
	while filled < buf.len() {
		match source.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(err) if err.kind() == ErrorKind::Interrupted => {}
			Err(err) => return Err(err.into()),
		}
	}
	Ok(filled)
}

fn shift_eof(err: BagError, base: usize) -> BagError {
	match err {
		BagError::UnexpectedEof { at, need, rem } => BagError::UnexpectedEof { at: at + base, need, rem },
		other => other,
	}
}

#[cfg(test)]
mod tests;
