use std::path::PathBuf;

use tagbag::bag::{BagStats, Endianness, Result};

use crate::cmd::util::{EndianArg, emit_json, load_bags, read_input};

#[derive(clap::Args)]
pub struct Args {
	/// Binary input, or `-` for stdin.
	pub file: PathBuf,
	#[arg(long)]
	pub frame: bool,
	#[arg(long, value_enum, default_value_t = EndianArg::Native)]
	pub endian: EndianArg,
	#[arg(long)]
	pub json: bool,
}

/// Print kind counts, depth, and sizes for each decoded bag.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file: path,
		frame,
		endian,
		json,
	} = args;

	let endianness = Endianness::from(endian);
	let bytes = read_input(&path)?;
	let stats: Vec<BagStats> = load_bags(&bytes, frame, endianness)?.iter().map(BagStats::collect).collect();

	if json {
		let payload = InspectJson {
			path: path.display().to_string(),
			endianness: endianness.as_str(),
			input_bytes: bytes.len(),
			bags: stats.iter().map(stats_to_json).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("endianness: {}", endianness.as_str());
	println!("input_bytes: {}", bytes.len());
	println!("bags: {}", stats.len());
	println!();
	println!("bag\ttop_level\tmax_depth\tpayload_bytes\tbinary_size\tint\tdouble\tblob\tlist\tstring");
	for (idx, item) in stats.iter().enumerate() {
		let size = item.binary_size.map_or_else(|| "-".to_owned(), |size| size.to_string());
		println!(
			"{idx}\t{}\t{}\t{}\t{size}\t{}\t{}\t{}\t{}\t{}",
			item.top_level,
			item.max_depth,
			item.payload_bytes,
			item.kinds.int,
			item.kinds.double,
			item.kinds.blob,
			item.kinds.list,
			item.kinds.string
		);
	}

	Ok(())
}

fn stats_to_json(stats: &BagStats) -> StatsJson {
	StatsJson {
		top_level: stats.top_level,
		max_depth: stats.max_depth,
		payload_bytes: stats.payload_bytes,
		binary_size: stats.binary_size,
		kinds: KindsJson {
			int: stats.kinds.int,
			double: stats.kinds.double,
			blob: stats.kinds.blob,
			list: stats.kinds.list,
			string: stats.kinds.string,
			total: stats.kinds.total(),
		},
	}
}

#[derive(serde::Serialize)]
struct KindsJson {
	int: usize,
	double: usize,
	blob: usize,
	list: usize,
	string: usize,
	total: usize,
}

#[derive(serde::Serialize)]
struct StatsJson {
	top_level: usize,
	max_depth: u32,
	payload_bytes: usize,
	binary_size: Option<usize>,
	kinds: KindsJson,
}

#[derive(serde::Serialize)]
struct InspectJson {
	path: String,
	endianness: &'static str,
	input_bytes: usize,
	bags: Vec<StatsJson>,
}
