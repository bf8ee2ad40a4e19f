#![allow(missing_docs)]

use tagbag::bag::{Bag, Kind, Portable, Value};
use tagbag_testkit::{CORPUS_TEXT, squash_whitespace};

#[test]
fn scalar_bag_text_and_size() {
	let mut bag = Bag::new();
	bag.add_int(7);
	bag.add_double(0.5);
	bag.add_string("hi");

	assert_eq!(bag.to_text(), "7 0.5 hi");
	assert_eq!(bag.binary_size().expect("measure"), 4 + 3 * 4 + 4 + 8 + 4 + 3);
}

#[test]
fn parsed_kinds_follow_token_shape() {
	let kinds = |text: &str| -> Vec<Option<Kind>> { text.parse::<Bag>().expect("parses").iter().map(Value::kind).collect() };

	assert_eq!(kinds("1 2 3"), [Some(Kind::Int); 3]);
	assert_eq!(kinds("1.5 2 foo"), [Some(Kind::Double), Some(Kind::Int), Some(Kind::String)]);
	assert_eq!(kinds("( 1 2 ) 3"), [Some(Kind::List), Some(Kind::Int)]);
	assert_eq!(kinds("{ 10 20 30 }"), [Some(Kind::Blob)]);
}

#[test]
fn corpus_survives_every_hop() {
	let parsed: Bag = CORPUS_TEXT.parse().expect("corpus parses");

	let owned = parsed.to_binary().expect("owned encode");
	let mut via_buffer = vec![0_u8; parsed.binary_size().expect("measure")];
	parsed.to_binary_into(&mut via_buffer).expect("buffer encode");
	assert_eq!(owned, via_buffer);

	let mut decoded = Bag::new();
	decoded.read_binary(&owned).expect("decode");

	let mut assigned = Bag::new();
	assigned.clone_from(&decoded);

	let mut wire = Vec::new();
	assigned.write(&mut wire).expect("frame write");
	let mut received = Bag::new();
	received.read(&mut wire.as_slice()).expect("frame read");

	assert_eq!(received, parsed);
	assert_eq!(squash_whitespace(&received.to_text()), squash_whitespace(CORPUS_TEXT));
}
