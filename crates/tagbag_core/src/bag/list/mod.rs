use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::bag::binary::{self, DecodeOptions, EncodeOptions};
use crate::bag::text::{self, ParseOptions};
use crate::bag::{BagError, Result, Value};

/// Ordered heterogeneous container of owned [`Value`]s.
///
/// Every insertion copies its payload and every clone is deep, so two bags
/// never share storage. Element order is insertion order.
#[derive(Default)]
pub struct Bag {
	elements: Vec<Value>,
	scratch: Option<Vec<u8>>,
}

impl Bag {
	/// Create an empty bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty bag with room for `capacity` elements.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			elements: Vec::with_capacity(capacity),
			scratch: None,
		}
	}

	/// Parse a bag from its text form with default options.
	pub fn from_text(input: &str) -> Result<Self> {
		text::parse(input, &ParseOptions::default())
	}

	/// Decode a bag from its binary form in host byte order.
	pub fn from_binary(bytes: &[u8]) -> Result<Self> {
		binary::decode(bytes, &DecodeOptions::default())
	}

	/// Append an integer.
	pub fn add_int(&mut self, value: i32) {
		self.elements.push(Value::Int(value));
	}

	/// Append a double.
	pub fn add_double(&mut self, value: f64) {
		self.elements.push(Value::Double(value));
	}

	/// Append a string, truncated at its first NUL byte.
	pub fn add_string(&mut self, text: impl AsRef<[u8]>) {
		self.elements.push(Value::string(text));
	}

	/// Append a copy of `bytes` as a blob.
	pub fn add_blob(&mut self, bytes: &[u8]) {
		self.elements.push(Value::blob(bytes));
	}

	/// Append an empty nested bag and return it for filling.
	pub fn add_list(&mut self) -> &mut Bag {
		self.elements.push(Value::List(Self::new()));
		match self.elements.last_mut() {
			Some(Value::List(bag)) => bag,
			_ => unreachable!("list was just pushed"),
		}
	}

	/// Append a deep copy of `value`.
	pub fn add(&mut self, value: &Value) {
		self.elements.push(value.clone());
	}

	/// Append `value` by move.
	pub fn push(&mut self, value: Value) {
		self.elements.push(value);
	}

	/// Insert a deep copy of `value` at `index`, shifting later elements up.
	///
	/// # Panics
	///
	/// Panics if `index > len()`.
	pub fn insert(&mut self, value: &Value, index: usize) {
		let len = self.elements.len();
		assert!(index <= len, "bag insert index {index} out of range for length {len}");
		self.elements.insert(index, value.clone());
	}

	/// Append deep copies of every element of `other`, without nesting it.
	pub fn append(&mut self, other: &Bag) {
		self.elements.extend(other.elements.iter().cloned());
	}

	/// Remove and return the element at `index`, shifting later elements down.
	///
	/// # Panics
	///
	/// Panics if `index >= len()`.
	pub fn remove(&mut self, index: usize) -> Value {
		let len = self.elements.len();
		assert!(index < len, "bag remove index {index} out of range for length {len}");
		self.elements.remove(index)
	}

	/// Element at `index`.
	pub fn get(&self, index: usize) -> Option<&Value> {
		self.elements.get(index)
	}

	/// Mutable element at `index`.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
		self.elements.get_mut(index)
	}

	/// Number of top-level elements.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Alias of [`Bag::len`].
	pub fn count(&self) -> usize {
		self.elements.len()
	}

	/// Return `true` when the bag holds no elements.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Drop every element and release the scratch buffer.
	pub fn clear(&mut self) {
		self.elements.clear();
		self.scratch = None;
	}

	/// Replace the contents with deep copies of `other`'s elements.
	pub fn copy_from(&mut self, other: &Bag) {
		self.clear();
		self.append(other);
	}

	/// Iterate elements in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.elements.iter()
	}

	/// Iterate elements mutably in order.
	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
		self.elements.iter_mut()
	}

	/// Elements as a slice.
	pub fn as_slice(&self) -> &[Value] {
		&self.elements
	}

	/// Encoded size in bytes of the binary form.
	pub fn binary_size(&self) -> Result<usize> {
		binary::binary_size(self)
	}

	/// Encode into a new buffer in host byte order.
	pub fn to_binary(&self) -> Result<Vec<u8>> {
		binary::encode(self, &EncodeOptions::default())
	}

	/// Encode into a caller buffer of at least [`Bag::binary_size`] bytes.
	///
	/// Returns the number of bytes written.
	pub fn to_binary_into(&self, out: &mut [u8]) -> Result<usize> {
		binary::encode_into(self, out, &EncodeOptions::default())
	}

	/// Encode into the bag's own scratch buffer and borrow the bytes.
	///
	/// The buffer is reused across calls and released by [`Bag::clear`]. The
	/// returned slice lives until the bag is next mutated or re-encoded.
	pub fn to_binary_scratch(&mut self) -> Result<&[u8]> {
		let opt = EncodeOptions::default();
		let need = binary::measure(self, &opt)?;
		let mut scratch = self.scratch.take().unwrap_or_default();
		scratch.clear();
		scratch.resize(need, 0);
		let written = binary::write_measured(self, &mut scratch, &opt);
		let scratch = self.scratch.insert(scratch);
		written?;
		Ok(scratch.as_slice())
	}

	/// Replace the contents with a bag decoded from `bytes` in host byte order.
	///
	/// On error the bag keeps whatever was decoded before the failure.
	pub fn read_binary(&mut self, bytes: &[u8]) -> Result<()> {
		binary::decode_into(self, bytes, &DecodeOptions::default())
	}

	/// Render the text form.
	pub fn to_text(&self) -> String {
		self.to_string()
	}
}

impl Clone for Bag {
	fn clone(&self) -> Self {
		Self {
			elements: self.elements.clone(),
			scratch: None,
		}
	}

	fn clone_from(&mut self, source: &Self) {
		self.elements.clone_from(&source.elements);
	}
}

impl PartialEq for Bag {
	fn eq(&self, other: &Self) -> bool {
		self.elements == other.elements
	}
}

impl fmt::Debug for Bag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(&self.elements).finish()
	}
}

impl fmt::Display for Bag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		text::write_bag(f, self)
	}
}

impl FromStr for Bag {
	type Err = BagError;

	fn from_str(input: &str) -> Result<Self> {
		Self::from_text(input)
	}
}

impl Index<usize> for Bag {
	type Output = Value;

	fn index(&self, index: usize) -> &Value {
		let len = self.elements.len();
		self.elements
			.get(index)
			.unwrap_or_else(|| panic!("bag index {index} out of range for length {len}"))
	}
}

impl IndexMut<usize> for Bag {
	fn index_mut(&mut self, index: usize) -> &mut Value {
		let len = self.elements.len();
		self.elements
			.get_mut(index)
			.unwrap_or_else(|| panic!("bag index {index} out of range for length {len}"))
	}
}

impl FromIterator<Value> for Bag {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self {
			elements: iter.into_iter().collect(),
			scratch: None,
		}
	}
}

impl Extend<Value> for Bag {
	fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
		self.elements.extend(iter);
	}
}

impl IntoIterator for Bag {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.elements.into_iter()
	}
}

impl<'a> IntoIterator for &'a Bag {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.elements.iter()
	}
}
