mod binary;
mod bytes;
mod endian;
mod error;
mod frame;
mod list;
mod stats;
mod text;
mod value;

/// Binary codec entry points and options.
pub use binary::{DecodeOptions, EncodeOptions, binary_size, decode, decode_into, encode, encode_into};
/// Bounded cursor over encoded bytes.
pub use bytes::Cursor;
/// Wire byte order selection.
pub use endian::Endianness;
/// Error and result aliases.
pub use error::{BagError, Result};
/// Length-prefixed framing hooks for byte sinks and sources.
pub use frame::{FrameOptions, FrameReader, Portable, read_frame, write_frame};
/// Ordered bag container.
pub use list::Bag;
/// Structural summary of a bag tree.
pub use stats::{BagStats, KindCounts};
/// Text tokenizer, parser, and options.
pub use text::{ParseOptions, Token, Tokens, parse, parse_into};
/// Tagged cell and its kind discriminator.
pub use value::{Kind, Value};
