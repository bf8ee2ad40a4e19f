/// Byte order used for every integer and float field on the wire.
///
/// Peers exchange bags in their host's native order; [`Endianness::NATIVE`]
/// is the default everywhere and produces bytes that are not portable across
/// hosts of different byte order. Pick an explicit order to get a fixed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
	/// Least significant byte first.
	Little,
	/// Most significant byte first.
	Big,
}

impl Endianness {
	/// Byte order of the compiling host.
	#[cfg(target_endian = "little")]
	pub const NATIVE: Self = Self::Little;
	/// Byte order of the compiling host.
	#[cfg(target_endian = "big")]
	pub const NATIVE: Self = Self::Big;

	/// Lower-case label for display.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}

	pub(crate) fn i32_bytes(self, value: i32) -> [u8; 4] {
		match self {
			Self::Little => value.to_le_bytes(),
			Self::Big => value.to_be_bytes(),
		}
	}

	pub(crate) fn f64_bytes(self, value: f64) -> [u8; 8] {
		match self {
			Self::Little => value.to_le_bytes(),
			Self::Big => value.to_be_bytes(),
		}
	}
}

impl Default for Endianness {
	fn default() -> Self {
		Self::NATIVE
	}
}
