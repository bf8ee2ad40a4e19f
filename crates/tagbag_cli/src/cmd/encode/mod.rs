use std::io::{Read, Write};
use std::path::PathBuf;

use tagbag::bag::{Bag, EncodeOptions, Endianness, FrameOptions, Result, encode, write_frame};
use tracing::info;

use crate::cmd::util::EndianArg;

#[derive(clap::Args)]
pub struct Args {
	/// Bag text; read from `--input` or stdin when absent.
	#[arg(conflicts_with = "input", allow_hyphen_values = true)]
	pub text: Option<String>,
	#[arg(long)]
	pub input: Option<PathBuf>,
	#[arg(short, long)]
	pub output: Option<PathBuf>,
	/// Prefix the encoding with its int32 length.
	#[arg(long)]
	pub frame: bool,
	#[arg(long, value_enum, default_value_t = EndianArg::Native)]
	pub endian: EndianArg,
}

/// Parse bag text and write its binary encoding to a file or stdout.
pub fn run(args: Args) -> Result<()> {
	let Args {
		text,
		input,
		output,
		frame,
		endian,
	} = args;

	let text = match (text, input) {
		(Some(text), _) => text,
		(None, Some(path)) => std::fs::read_to_string(&path)?,
		(None, None) => {
			let mut buf = String::new();
			std::io::stdin().lock().read_to_string(&mut buf)?;
			buf
		}
	};

	let bag = Bag::from_text(&text)?;
	let endianness = Endianness::from(endian);
	let bytes = if frame {
		let mut out = Vec::new();
		write_frame(&bag, &mut out, &FrameOptions::with_endianness(endianness))?;
		out
	} else {
		encode(&bag, &EncodeOptions::with_endianness(endianness))?
	};
	info!(elements = bag.len(), bytes = bytes.len(), endianness = endianness.as_str(), frame, "encoded bag");

	match output {
		Some(path) => std::fs::write(&path, &bytes)?,
		None => {
			let mut out = std::io::stdout().lock();
			out.write_all(&bytes)?;
			out.flush()?;
		}
	}

	Ok(())
}
