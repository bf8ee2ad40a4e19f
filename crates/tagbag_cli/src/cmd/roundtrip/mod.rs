use tagbag::bag::{Bag, Result};
use tracing::warn;

use crate::cmd::util::{bag_to_json, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[arg(allow_hyphen_values = true)]
	pub text: String,
	#[arg(long)]
	pub json: bool,
}

/// Parse text, encode it, decode the bytes, and compare both sides.
pub fn run(args: Args) -> Result<()> {
	let Args { text, json } = args;

	let parsed = Bag::from_text(&text)?;
	let bytes = parsed.to_binary()?;
	let decoded = Bag::from_binary(&bytes)?;
	let equal = decoded == parsed;
	if !equal {
		warn!(binary_size = bytes.len(), "decoded bag differs from parsed bag");
	}

	if json {
		let payload = RoundtripJson {
			parsed: parsed.to_text(),
			decoded: decoded.to_text(),
			binary_size: bytes.len(),
			equal,
			bag: bag_to_json(&decoded),
		};
		return emit_json(&payload);
	}

	println!("parsed: {parsed}");
	println!("decoded: {decoded}");
	println!("binary_size: {}", bytes.len());
	println!("equal: {equal}");

	Ok(())
}

#[derive(serde::Serialize)]
struct RoundtripJson {
	parsed: String,
	decoded: String,
	binary_size: usize,
	equal: bool,
	bag: serde_json::Value,
}

#[cfg(test)]
mod tests;
