//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Text example exercising every kind, nesting, and irregular spacing.
pub const CORPUS_TEXT: &str = "1 2 3 4 (5 6.2 7 8 {64 5 6 7} Hello)(World 1 2 3    ) { 4 5 6 7 87} (5 6 3.2) 1 2 4 {5 6 7} (3 4 5) 1";

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Create a fresh scratch directory under the target dir for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
	let dir = target_dir().join("tagbag-test-scratch").join(name);
	let _ = std::fs::remove_dir_all(&dir);
	std::fs::create_dir_all(&dir).expect("scratch dir is creatable");
	dir
}

/// Normalize text to single-spaced tokens with delimiters split out.
///
/// Two texts that tokenize the same way normalize to the same string.
pub fn squash_whitespace(text: &str) -> String {
	let mut spaced = String::with_capacity(text.len() * 2);
	for ch in text.chars() {
		if matches!(ch, '(' | ')' | '{' | '}') {
			spaced.push(' ');
			spaced.push(ch);
			spaced.push(' ');
		} else {
			spaced.push(ch);
		}
	}
	spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse command stdout as JSON.
pub fn parse_json(stdout: &[u8]) -> serde_json::Value {
	serde_json::from_slice(stdout).expect("stdout should be valid json")
}

/// Hand builder for wire bytes in a fixed byte order.
#[derive(Debug, Clone)]
pub struct WireBuilder {
	big: bool,
	out: Vec<u8>,
}

impl WireBuilder {
	/// Little-endian builder.
	pub fn little() -> Self {
		Self { big: false, out: Vec::new() }
	}

	/// Big-endian builder.
	pub fn big() -> Self {
		Self { big: true, out: Vec::new() }
	}

	/// Host-order builder.
	pub fn native() -> Self {
		if cfg!(target_endian = "big") { Self::big() } else { Self::little() }
	}

	/// Append an int32.
	pub fn i32(mut self, value: i32) -> Self {
		let bytes = if self.big { value.to_be_bytes() } else { value.to_le_bytes() };
		self.out.extend_from_slice(&bytes);
		self
	}

	/// Append a float64.
	pub fn f64(mut self, value: f64) -> Self {
		let bytes = if self.big { value.to_be_bytes() } else { value.to_le_bytes() };
		self.out.extend_from_slice(&bytes);
		self
	}

	/// Append raw bytes.
	pub fn bytes(mut self, bytes: &[u8]) -> Self {
		self.out.extend_from_slice(bytes);
		self
	}

	/// Return the built bytes.
	pub fn finish(self) -> Vec<u8> {
		self.out
	}
}
