use std::io::{self, Cursor, Read};

use tagbag_testkit::{CORPUS_TEXT, WireBuilder};

use crate::bag::{Bag, BagError, Endianness, FrameOptions, FrameReader, Portable, read_frame, write_frame};

fn corpus() -> Bag {
	Bag::from_text(CORPUS_TEXT).expect("corpus parses")
}

#[test]
fn frame_is_length_prefix_then_body() {
	let bag = corpus();
	let mut sink = Vec::new();
	bag.write(&mut sink).expect("write frame");

	let body = bag.to_binary().expect("encode");
	assert_eq!(sink.len(), 4 + body.len());
	assert_eq!(sink[..4], (body.len() as i32).to_ne_bytes());
	assert_eq!(&sink[4..], body.as_slice());
}

#[test]
fn portable_round_trip_replaces_contents() {
	let bag = corpus();
	let mut wire = Vec::new();
	bag.write(&mut wire).expect("write frame");

	let mut received = Bag::new();
	received.add_string("stale");
	received.read(&mut wire.as_slice()).expect("read frame");
	assert_eq!(received, bag);
}

#[test]
fn big_endian_frames_round_trip() {
	let bag = corpus();
	let opt = FrameOptions::with_endianness(Endianness::Big);
	let mut wire = Vec::new();
	write_frame(&bag, &mut wire, &opt).expect("write frame");
	assert_eq!(wire[..4], (wire.len() as i32 - 4).to_be_bytes());

	let mut received = Bag::new();
	read_frame(&mut received, &mut wire.as_slice(), &opt).expect("read frame");
	assert_eq!(received, bag);
}

#[test]
fn short_body_reports_eof() {
	let bytes = WireBuilder::little().i32(12).i32(0).finish();
	let opt = FrameOptions::with_endianness(Endianness::Little);
	let err = read_frame(&mut Bag::new(), &mut bytes.as_slice(), &opt).expect_err("body truncated");
	assert!(matches!(err, BagError::UnexpectedEof { at: 8, need: 8, rem: 0 }));
}

#[test]
fn short_prefix_reports_eof() {
	let err = read_frame(&mut Bag::new(), &mut &[1_u8, 0][..], &FrameOptions::default()).expect_err("prefix truncated");
	assert!(matches!(err, BagError::UnexpectedEof { at: 2, need: 2, rem: 0 }));
}

#[test]
fn negative_and_oversized_lengths_are_rejected() {
	let opt = FrameOptions {
		max_frame_len: 16,
		..FrameOptions::with_endianness(Endianness::Little)
	};

	let bytes = WireBuilder::little().i32(-8).finish();
	let err = read_frame(&mut Bag::new(), &mut bytes.as_slice(), &opt).expect_err("negative length");
	assert!(matches!(err, BagError::NegativeFrameLength { len: -8 }));

	let bytes = WireBuilder::little().i32(17).finish();
	let err = read_frame(&mut Bag::new(), &mut bytes.as_slice(), &opt).expect_err("oversized");
	assert!(matches!(err, BagError::FrameTooLarge { len: 17, limit: 16 }));
}

#[test]
fn declared_length_must_match_decoded_size() {
	let bytes = WireBuilder::little().i32(8).i32(0).i32(0).finish();
	let opt = FrameOptions::with_endianness(Endianness::Little);
	let err = read_frame(&mut Bag::new(), &mut bytes.as_slice(), &opt).expect_err("padding after bag");
	assert!(matches!(err, BagError::SizeMismatch { expected: 8, consumed: 4 }));
}

struct FailingSource;

impl Read for FailingSource {
	fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
		Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
	}
}

#[test]
fn source_errors_surface_as_io() {
	let err = read_frame(&mut Bag::new(), &mut FailingSource, &FrameOptions::default()).expect_err("source fails");
	assert!(matches!(err, BagError::Io(ref inner) if inner.kind() == io::ErrorKind::ConnectionReset));
}

#[test]
fn frame_reader_yields_each_frame_then_stops() {
	let first = corpus();
	let mut second = Bag::new();
	second.add_int(1);
	let third = Bag::new();

	let mut wire = Vec::new();
	for bag in [&first, &second, &third] {
		write_frame(bag, &mut wire, &FrameOptions::default()).expect("write frame");
	}

	let mut reader = FrameReader::new(Cursor::new(wire.clone()), FrameOptions::default());
	let bags: Vec<_> = reader.by_ref().collect::<Result<_, _>>().expect("all frames decode");
	assert_eq!(bags, [first, second, third]);
	assert_eq!(reader.offset(), wire.len());
}

#[test]
fn frame_reader_reports_torn_frame_once() {
	let mut wire = Vec::new();
	write_frame(&corpus(), &mut wire, &FrameOptions::default()).expect("write frame");
	let whole = wire.len();
	write_frame(&corpus(), &mut wire, &FrameOptions::default()).expect("write frame");
	wire.truncate(whole + 6);

	let mut reader = FrameReader::new(wire.as_slice(), FrameOptions::default());
	assert!(reader.next().expect("first frame").is_ok());
	let err = reader.next().expect("second frame").expect_err("torn frame");
	assert!(matches!(err, BagError::UnexpectedEof { at, .. } if at == whole + 6));
	assert!(reader.next().is_none());
}

fn nested_levels(levels: u32) -> Bag {
	let mut bag = Bag::new();
	let mut cursor = &mut bag;
	for _ in 1..levels {
		cursor = cursor.add_list();
	}
	cursor.add_string("leaf");
	bag
}

#[test]
fn portable_write_refuses_what_portable_read_would_reject() {
	let at_limit = nested_levels(64);
	let mut wire = Vec::new();
	at_limit.write(&mut wire).expect("deepest readable tree is written");
	let mut received = Bag::new();
	received.read(&mut wire.as_slice()).expect("and read back");
	assert_eq!(received, at_limit);

	let mut wire = Vec::new();
	let err = nested_levels(65).write(&mut wire).expect_err("one level too deep");
	assert!(matches!(err, BagError::EncodeDepthExceeded { max_depth: 64 }));
	assert!(wire.is_empty(), "nothing is written for a rejected bag");
}

#[test]
fn frame_options_depth_applies_to_writes() {
	let opt = FrameOptions {
		max_depth: 2,
		..FrameOptions::default()
	};
	let mut wire = Vec::new();
	write_frame(&nested_levels(2), &mut wire, &opt).expect("two levels fit");
	let err = write_frame(&nested_levels(3), &mut wire, &opt).expect_err("three levels exceed two");
	assert!(matches!(err, BagError::EncodeDepthExceeded { max_depth: 2 }));
}
