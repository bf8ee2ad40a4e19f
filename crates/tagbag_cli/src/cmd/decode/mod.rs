use std::path::PathBuf;

use tagbag::bag::{Endianness, Result};
use tracing::info;

use crate::cmd::util::{EndianArg, bag_to_json, emit_json, load_bags, read_input};

#[derive(clap::Args)]
pub struct Args {
	/// Binary input, or `-` for stdin.
	pub file: PathBuf,
	/// Read a stream of length-prefixed frames.
	#[arg(long)]
	pub frame: bool,
	#[arg(long, value_enum, default_value_t = EndianArg::Native)]
	pub endian: EndianArg,
	#[arg(long)]
	pub json: bool,
}

/// Decode binary bags and print one text line per bag.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file: path,
		frame,
		endian,
		json,
	} = args;

	let endianness = Endianness::from(endian);
	let bytes = read_input(&path)?;
	let bags = load_bags(&bytes, frame, endianness)?;
	info!(bytes = bytes.len(), bags = bags.len(), "decoded input");

	if json {
		let payload = DecodeJson {
			path: path.display().to_string(),
			endianness: endianness.as_str(),
			framed: frame,
			bags: bags.iter().map(bag_to_json).collect(),
		};
		return emit_json(&payload);
	}

	for bag in &bags {
		println!("{bag}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	endianness: &'static str,
	framed: bool,
	bags: Vec<serde_json::Value>,
}
