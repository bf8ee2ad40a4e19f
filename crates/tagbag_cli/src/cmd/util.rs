use std::io::{Read, Write};
use std::path::Path;

use serde_json::{Value as Json, json};
use tagbag::bag::{Bag, DecodeOptions, Endianness, FrameOptions, FrameReader, Result, Value, decode};

/// Byte order flag shared by the binary-facing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EndianArg {
	#[default]
	Native,
	Little,
	Big,
}

impl From<EndianArg> for Endianness {
	fn from(arg: EndianArg) -> Self {
		match arg {
			EndianArg::Native => Endianness::NATIVE,
			EndianArg::Little => Endianness::Little,
			EndianArg::Big => Endianness::Big,
		}
	}
}

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let mut out = std::io::stdout().lock();
	serde_json::to_writer_pretty(&mut out, payload).map_err(std::io::Error::from)?;
	writeln!(out)?;
	Ok(())
}

/// Read a whole file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
	if path.as_os_str() == "-" {
		let mut bytes = Vec::new();
		std::io::stdin().lock().read_to_end(&mut bytes)?;
		return Ok(bytes);
	}
	Ok(std::fs::read(path)?)
}

/// Decode one unframed bag, or every frame of a framed stream.
pub(crate) fn load_bags(bytes: &[u8], frame: bool, endianness: Endianness) -> Result<Vec<Bag>> {
	if frame {
		return FrameReader::new(bytes, FrameOptions::with_endianness(endianness)).collect();
	}
	Ok(vec![decode(bytes, &DecodeOptions::with_endianness(endianness))?])
}

/// JSON array of a bag's elements.
pub(crate) fn bag_to_json(bag: &Bag) -> Json {
	Json::Array(bag.iter().map(value_to_json).collect())
}

fn value_to_json(value: &Value) -> Json {
	match value {
		Value::Empty => Json::Null,
		Value::Int(item) => json!(item),
		Value::Double(item) => serde_json::Number::from_f64(*item).map_or_else(|| Json::String(item.to_string()), Json::Number),
		Value::Blob(bytes) => json!({ "blob": bytes }),
		Value::List(inner) => bag_to_json(inner),
		Value::String(bytes) => Json::String(String::from_utf8_lossy(bytes).into_owned()),
	}
}
