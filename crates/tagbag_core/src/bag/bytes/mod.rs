use crate::bag::{BagError, Endianness, Result};

/// Simple bounded cursor over an immutable byte slice.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(BagError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read an `i32` using the selected endianness.
	pub fn read_i32(&mut self, endianness: Endianness) -> Result<i32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(match endianness {
			Endianness::Little => i32::from_le_bytes(buf),
			Endianness::Big => i32::from_be_bytes(buf),
		})
	}

	/// Read an `f64` using the selected endianness.
	pub fn read_f64(&mut self, endianness: Endianness) -> Result<f64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(match endianness {
			Endianness::Little => f64::from_le_bytes(buf),
			Endianness::Big => f64::from_be_bytes(buf),
		})
	}

	/// Read a non-negative `i32` length field and widen to `usize`.
	///
	/// Negative values are rejected with [`BagError::NegativeLength`].
	pub fn read_len(&mut self, endianness: Endianness) -> Result<usize> {
		let at = self.pos;
		let len = self.read_i32(endianness)?;
		usize::try_from(len).map_err(|_| BagError::NegativeLength { len, at })
	}
}
