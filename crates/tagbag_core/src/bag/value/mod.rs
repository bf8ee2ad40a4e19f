use std::fmt;

use crate::bag::{Bag, BagError, Result};

/// Payload kind of a [`Value`], carrying the fixed wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
	/// Signed 32-bit integer.
	Int = 1,
	/// 64-bit IEEE-754 double.
	Double = 2,
	/// Opaque byte buffer.
	Blob = 3,
	/// Nested bag.
	List = 4,
	/// NUL-terminated byte string.
	String = 5,
}

impl Kind {
	/// All kinds in tag order.
	pub const ALL: [Self; 5] = [Self::Int, Self::Double, Self::Blob, Self::List, Self::String];

	/// Wire tag for this kind.
	pub fn tag(self) -> i32 {
		self as i32
	}

	/// Map a wire tag back to its kind.
	pub fn from_tag(tag: i32) -> Option<Self> {
		match tag {
			1 => Some(Self::Int),
			2 => Some(Self::Double),
			3 => Some(Self::Blob),
			4 => Some(Self::List),
			5 => Some(Self::String),
			_ => None,
		}
	}

	/// Lower-case label used in errors and reports.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Int => "int",
			Self::Double => "double",
			Self::Blob => "blob",
			Self::List => "list",
			Self::String => "string",
		}
	}
}

/// One tagged cell of a [`Bag`].
///
/// A value exclusively owns its payload; cloning deep-copies it, including
/// nested bags. String payloads are stored without their terminating NUL and
/// never contain NUL bytes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Unset value. Safe to drop and to assign into; cannot be encoded.
	#[default]
	Empty,
	/// Signed 32-bit integer.
	Int(i32),
	/// 64-bit double.
	Double(f64),
	/// Opaque bytes.
	Blob(Vec<u8>),
	/// Owned nested bag.
	List(Bag),
	/// String bytes, excluding the NUL terminator.
	String(Vec<u8>),
}

impl Value {
	/// Build a blob value from a copy of `bytes`.
	pub fn blob(bytes: &[u8]) -> Self {
		Self::Blob(bytes.to_vec())
	}

	/// Build a string value, truncating at the first NUL byte.
	pub fn string(text: impl AsRef<[u8]>) -> Self {
		let bytes = text.as_ref();
		let end = bytes.iter().position(|byte| *byte == 0).unwrap_or(bytes.len());
		Self::String(bytes[..end].to_vec())
	}

	/// Replace this value with a deep copy of `other`.
	pub fn assign(&mut self, other: &Self) {
		self.clone_from(other);
	}

	/// Kind of the held payload, or `None` for [`Value::Empty`].
	pub fn kind(&self) -> Option<Kind> {
		match self {
			Self::Empty => None,
			Self::Int(_) => Some(Kind::Int),
			Self::Double(_) => Some(Kind::Double),
			Self::Blob(_) => Some(Kind::Blob),
			Self::List(_) => Some(Kind::List),
			Self::String(_) => Some(Kind::String),
		}
	}

	/// Label of the held kind, `"empty"` when unset.
	pub fn kind_label(&self) -> &'static str {
		self.kind().map_or("empty", Kind::as_str)
	}

	/// Payload size: blob length, string length including NUL, otherwise 0.
	pub fn size(&self) -> usize {
		match self {
			Self::Blob(bytes) => bytes.len(),
			Self::String(bytes) => bytes.len() + 1,
			_ => 0,
		}
	}

	/// Return `true` for the unset state.
	pub fn is_empty_value(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Return `true` for integers.
	pub fn is_int(&self) -> bool {
		matches!(self, Self::Int(_))
	}

	/// Return `true` for doubles.
	pub fn is_double(&self) -> bool {
		matches!(self, Self::Double(_))
	}

	/// Return `true` for blobs.
	pub fn is_blob(&self) -> bool {
		matches!(self, Self::Blob(_))
	}

	/// Return `true` for nested bags.
	pub fn is_list(&self) -> bool {
		matches!(self, Self::List(_))
	}

	/// Return `true` for strings.
	pub fn is_string(&self) -> bool {
		matches!(self, Self::String(_))
	}

	/// Integer payload.
	pub fn as_int(&self) -> Option<i32> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	/// Double payload.
	pub fn as_double(&self) -> Option<f64> {
		match self {
			Self::Double(value) => Some(*value),
			_ => None,
		}
	}

	/// Blob bytes.
	pub fn as_blob(&self) -> Option<&[u8]> {
		match self {
			Self::Blob(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Blob length in bytes.
	pub fn blob_len(&self) -> Option<usize> {
		self.as_blob().map(<[u8]>::len)
	}

	/// String bytes without the NUL terminator.
	pub fn as_string(&self) -> Option<&[u8]> {
		match self {
			Self::String(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// String as UTF-8 text, `None` if not a string or not valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		self.as_string().and_then(|bytes| std::str::from_utf8(bytes).ok())
	}

	/// Nested bag.
	pub fn as_list(&self) -> Option<&Bag> {
		match self {
			Self::List(bag) => Some(bag),
			_ => None,
		}
	}

	/// Mutable nested bag.
	pub fn as_list_mut(&mut self) -> Option<&mut Bag> {
		match self {
			Self::List(bag) => Some(bag),
			_ => None,
		}
	}

	/// Integer payload or [`BagError::TypeMismatch`].
	pub fn expect_int(&self) -> Result<i32> {
		self.as_int().ok_or_else(|| self.mismatch(Kind::Int))
	}

	/// Double payload or [`BagError::TypeMismatch`].
	pub fn expect_double(&self) -> Result<f64> {
		self.as_double().ok_or_else(|| self.mismatch(Kind::Double))
	}

	/// Blob bytes or [`BagError::TypeMismatch`].
	pub fn expect_blob(&self) -> Result<&[u8]> {
		self.as_blob().ok_or_else(|| self.mismatch(Kind::Blob))
	}

	/// String bytes or [`BagError::TypeMismatch`].
	pub fn expect_string(&self) -> Result<&[u8]> {
		self.as_string().ok_or_else(|| self.mismatch(Kind::String))
	}

	/// Nested bag or [`BagError::TypeMismatch`].
	pub fn expect_list(&self) -> Result<&Bag> {
		self.as_list().ok_or_else(|| self.mismatch(Kind::List))
	}

	fn mismatch(&self, expected: Kind) -> BagError {
		BagError::TypeMismatch {
			expected: expected.as_str(),
			got: self.kind_label(),
		}
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Double(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::string(value)
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::string(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Self::Blob(value)
	}
}

impl From<Bag> for Value {
	fn from(value: Bag) -> Self {
		Self::List(value)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		crate::bag::text::write_value(f, self)
	}
}
