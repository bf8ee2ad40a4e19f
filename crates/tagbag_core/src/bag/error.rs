use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BagError>;

/// Errors produced while encoding, decoding, framing, and parsing bags.
#[derive(Debug, Error)]
pub enum BagError {
	/// Sink or source IO failure other than early end of stream.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Bag element count was negative.
	#[error("negative element count {count} at offset {at}")]
	NegativeCount {
		/// Parsed signed count.
		count: i32,
		/// Offset of the count field.
		at: usize,
	},
	/// Blob or string length was negative.
	#[error("negative payload length {len} at offset {at}")]
	NegativeLength {
		/// Parsed signed length.
		len: i32,
		/// Offset of the length field.
		at: usize,
	},
	/// Element tag is not one of the fixed wire tags.
	#[error("unknown element tag {tag} at offset {at}")]
	UnknownTag {
		/// Raw tag value.
		tag: i32,
		/// Offset of the tag field.
		at: usize,
	},
	/// String body is empty or does not end in NUL.
	#[error("string at offset {at} is not NUL-terminated")]
	UnterminatedString {
		/// Offset of the string body.
		at: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decoded bag did not consume exactly the declared number of bytes.
	#[error("decode size mismatch: expected {expected} bytes, consumed {consumed}")]
	SizeMismatch {
		/// Declared byte count.
		expected: usize,
		/// Bytes actually consumed by the decoder.
		consumed: usize,
	},
	/// An unset value cannot be written to the wire.
	#[error("cannot encode an empty value")]
	EncodeEmptyValue,
	/// String payload holds a NUL byte before its terminator.
	#[error("string holds an interior NUL at byte {at}")]
	InteriorNul {
		/// Index of the first NUL within the string bytes.
		at: usize,
	},
	/// Bag nesting exceeded the configured encode depth limit.
	#[error("encode depth exceeded (max={max_depth})")]
	EncodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// A count, length, or total size does not fit in the int32 wire field.
	#[error("length {len} does not fit in an int32 field")]
	LengthOverflow {
		/// Offending length.
		len: usize,
	},
	/// Caller-provided buffer is smaller than the encoded size.
	#[error("encode buffer too small: need={need}, have={have}")]
	BufferTooSmall {
		/// Required number of bytes.
		need: usize,
		/// Available bytes.
		have: usize,
	},
	/// Frame length prefix was negative.
	#[error("negative frame length {len}")]
	NegativeFrameLength {
		/// Parsed signed length.
		len: i32,
	},
	/// Frame length prefix exceeded configured limit.
	#[error("frame length {len} exceeds limit {limit} bytes")]
	FrameTooLarge {
		/// Declared frame length.
		len: usize,
		/// Maximum allowed frame length.
		limit: usize,
	},
	/// Accessor was called on a value of another kind.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected kind label.
		expected: &'static str,
		/// Actual kind label.
		got: &'static str,
	},
	/// End of text reached inside a `(` list.
	#[error("unclosed '(' opened at offset {at}")]
	UnclosedList {
		/// Offset of the opening parenthesis.
		at: usize,
	},
	/// End of text reached inside a `{` blob.
	#[error("unclosed '{{' opened at offset {at}")]
	UnclosedBlob {
		/// Offset of the opening brace.
		at: usize,
	},
	/// Closing delimiter without a matching opener.
	#[error("unexpected '{token}' at offset {at}")]
	UnexpectedClose {
		/// Closing delimiter text.
		token: String,
		/// Offset of the delimiter.
		at: usize,
	},
	/// Blob token is not an integer byte value.
	#[error("invalid blob byte '{token}' at offset {at}")]
	InvalidBlobByte {
		/// Offending token text.
		token: String,
		/// Offset of the token.
		at: usize,
	},
	/// Token is neither a word nor a valid number.
	#[error("invalid number '{token}' at offset {at}")]
	InvalidNumber {
		/// Offending token text.
		token: String,
		/// Offset of the token.
		at: usize,
	},
	/// Text nesting depth exceeded configured limit.
	#[error("parse depth exceeded (max={max_depth})")]
	ParseDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
}
