use tagbag_testkit::CORPUS_TEXT;

use crate::bag::{Bag, BagError, BagStats, Kind, Value};

#[test]
fn corpus_summary() {
	let bag = Bag::from_text(CORPUS_TEXT).expect("corpus parses");
	let stats = BagStats::collect(&bag);

	assert_eq!(stats.top_level, 14);
	assert_eq!(stats.kinds.get(Kind::List), 4);
	assert_eq!(stats.kinds.get(Kind::Blob), 3);
	assert_eq!(stats.kinds.get(Kind::String), 2);
	assert_eq!(stats.kinds.get(Kind::Double), 2);
	assert_eq!(stats.kinds.get(Kind::Int), 19);
	assert_eq!(stats.kinds.total(), 30);
	assert_eq!(stats.max_depth, 2);
	assert_eq!(stats.payload_bytes, 4 + 5 + 3 + 6 + 6);
	assert_eq!(stats.binary_size, Some(bag.binary_size().expect("measure")));
}

#[test]
fn empty_bag_has_depth_one() {
	let stats = BagStats::collect(&Bag::new());
	assert_eq!(stats.max_depth, 1);
	assert_eq!(stats.kinds.total(), 0);
	assert_eq!(stats.binary_size, Some(4));
}

#[test]
fn unset_values_are_counted_but_not_encodable() {
	let mut bag = Bag::new();
	bag.push(Value::Empty);
	let stats = BagStats::collect(&bag);
	assert_eq!(stats.kinds.empty, 1);
	assert_eq!(stats.binary_size, None);
	assert!(matches!(BagStats::collect_encodable(&bag), Err(BagError::EncodeEmptyValue)));
}
