use tagbag_testkit::{CORPUS_TEXT, squash_whitespace};

use crate::cmd::test_support::{run_tagbag, run_tagbag_json};

#[test]
fn roundtrip_json_reports_equal_corpus() {
	let json = run_tagbag_json(&["roundtrip", CORPUS_TEXT, "--json"]);

	assert_eq!(json["equal"], true);
	assert_eq!(json["parsed"], json["decoded"]);
	let decoded = json["decoded"].as_str().expect("decoded text");
	assert_eq!(squash_whitespace(decoded), squash_whitespace(CORPUS_TEXT));
	assert!(json["binary_size"].as_u64().is_some_and(|size| size > 4));
}

#[test]
fn roundtrip_text_shows_scalar_scenario() {
	let output = run_tagbag(&["roundtrip", "7 0.5 hi"]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

	let stdout = String::from_utf8_lossy(&output.stdout);
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines, ["parsed: 7 0.5 hi", "decoded: 7 0.5 hi", "binary_size: 35", "equal: true"]);
}

#[test]
fn roundtrip_prints_integral_doubles_as_doubles() {
	let json = run_tagbag_json(&["roundtrip", "2.0 2", "--json"]);
	assert_eq!(json["decoded"], "2.0 2");
	assert_eq!(json["bag"][0].as_f64(), Some(2.0));
	assert_eq!(json["bag"][1].as_i64(), Some(2));
}

#[test]
fn roundtrip_rejects_malformed_numbers() {
	let output = run_tagbag(&["roundtrip", "12x"]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("invalid number '12x'"), "unexpected stderr: {stderr}");
}
