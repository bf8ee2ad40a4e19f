use crate::bag::{Bag, Kind, Result, Value};

/// Element counts per kind across a whole bag tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
	/// Integers.
	pub int: usize,
	/// Doubles.
	pub double: usize,
	/// Blobs.
	pub blob: usize,
	/// Nested bags.
	pub list: usize,
	/// Strings.
	pub string: usize,
	/// Unset values.
	pub empty: usize,
}

impl KindCounts {
	/// Count for one kind.
	pub fn get(&self, kind: Kind) -> usize {
		match kind {
			Kind::Int => self.int,
			Kind::Double => self.double,
			Kind::Blob => self.blob,
			Kind::List => self.list,
			Kind::String => self.string,
		}
	}

	/// Sum over every kind, including unset values.
	pub fn total(&self) -> usize {
		self.int + self.double + self.blob + self.list + self.string + self.empty
	}
}

/// Structural summary of a bag tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagStats {
	/// Elements of the top-level bag.
	pub top_level: usize,
	/// Elements at every depth.
	pub kinds: KindCounts,
	/// Deepest bag level; the top-level bag is level 1.
	pub max_depth: u32,
	/// Blob bytes plus string bytes including each NUL.
	pub payload_bytes: usize,
	/// Encoded size, or `None` when the tree holds an unset value.
	pub binary_size: Option<usize>,
}

impl BagStats {
	/// Walk `bag` and collect its summary.
	pub fn collect(bag: &Bag) -> Self {
		let mut stats = Self {
			top_level: bag.len(),
			kinds: KindCounts::default(),
			max_depth: 0,
			payload_bytes: 0,
			binary_size: bag.binary_size().ok(),
		};
		stats.visit(bag, 1);
		stats
	}

	/// Walk `bag`, failing if it cannot be encoded.
	pub fn collect_encodable(bag: &Bag) -> Result<Self> {
		let size = bag.binary_size()?;
		let mut stats = Self::collect(bag);
		stats.binary_size = Some(size);
		Ok(stats)
	}

	fn visit(&mut self, bag: &Bag, depth: u32) {
		self.max_depth = self.max_depth.max(depth);
		for value in bag {
			self.payload_bytes += value.size();
			match value {
				Value::Empty => self.kinds.empty += 1,
				Value::Int(_) => self.kinds.int += 1,
				Value::Double(_) => self.kinds.double += 1,
				Value::Blob(_) => self.kinds.blob += 1,
				Value::String(_) => self.kinds.string += 1,
				Value::List(inner) => {
					self.kinds.list += 1;
					self.visit(inner, depth + 1);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests;
