#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "tagbag", about = "Typed bag encoding and inspection tools")]
struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Parse bag text and write its binary form.
	Encode(cmd::encode::Args),
	/// Decode binary bags and print them as text or JSON.
	Decode(cmd::decode::Args),
	/// Summarize the structure of binary bags.
	Inspect(cmd::inspect::Args),
	/// Parse, encode, and decode text, reporting what survived.
	Roundtrip(cmd::roundtrip::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> tagbag::bag::Result<()> {
	let cli = Cli::parse();

	let filter = match cli.verbose {
		0 => EnvFilter::new("warn"),
		1 => EnvFilter::new("info"),
		2 => EnvFilter::new("debug"),
		_ => EnvFilter::new("trace"),
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	match cli.command {
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Inspect(args) => cmd::inspect::run(args),
		Commands::Roundtrip(args) => cmd::roundtrip::run(args),
	}
}
