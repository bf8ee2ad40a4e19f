use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use tagbag::bag::{Bag, FrameOptions, write_frame};
use tagbag_testkit::{parse_json, scratch_dir, target_dir as workspace_target_dir};

static TAGBAG_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_tagbag(args: &[&str]) -> Output {
	Command::new(tagbag_bin()).args(args).output().expect("tagbag command executes")
}

pub(crate) fn run_tagbag_json(args: &[&str]) -> serde_json::Value {
	let output = run_tagbag(args);
	assert!(
		output.status.success(),
		"tagbag command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	parse_json(&output.stdout)
}

/// Write `texts` as host-order binary into a fresh scratch file.
///
/// A single text is written unframed unless `frame` is set.
pub(crate) fn write_bag_file(test: &str, texts: &[&str], frame: bool) -> PathBuf {
	let path = scratch_dir(test).join("input.bag");
	let mut bytes = Vec::new();
	for text in texts {
		let bag = Bag::from_text(text).expect("fixture text parses");
		if frame {
			write_frame(&bag, &mut bytes, &FrameOptions::default()).expect("fixture frames");
		} else {
			bytes.extend_from_slice(&bag.to_binary().expect("fixture encodes"));
		}
	}
	std::fs::write(&path, bytes).expect("fixture file is writable");
	path
}

pub(crate) fn path_arg(path: &std::path::Path) -> String {
	path.to_string_lossy().into_owned()
}

fn tagbag_bin() -> &'static PathBuf {
	TAGBAG_BIN.get_or_init(resolve_tagbag_bin)
}

fn resolve_tagbag_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_tagbag") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "tagbag.exe" } else { "tagbag" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "tagbag"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build tagbag binary at {}", bin.display());

	bin
}
