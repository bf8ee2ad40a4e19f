//! Human-readable form of a bag.
//!
//! ```text
//! bag   := token*
//! token := atom | '(' bag ')' | '{' byte* '}'
//! atom  := INT | DOUBLE | WORD
//! ```
//!
//! A WORD starts with an ASCII letter and becomes a string. Any other atom is
//! a double when it contains `.` and an int otherwise. Blob bytes accept
//! `-128..=255` so the signed bytes the printer emits parse back.
//!
//! Printing then parsing is not an identity: strings that do not start with a
//! letter or that contain whitespace or delimiters, empty strings, and
//! non-finite doubles come back as something else or fail to parse.

use std::fmt::{self, Write as _};

use crate::bag::binary::DEFAULT_MAX_DEPTH;
use crate::bag::{Bag, BagError, Result, Value};

/// Nesting limit for the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
	/// Maximum bag nesting depth, counting the top-level bag.
	pub max_depth: u32,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self { max_depth: DEFAULT_MAX_DEPTH }
	}
}

/// One lexical token with its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
	/// `(`
	OpenList,
	/// `)`
	CloseList,
	/// `{`
	OpenBlob,
	/// `}`
	CloseBlob,
	/// Any maximal run of non-space, non-delimiter characters.
	Atom(&'a str),
}

impl Token<'_> {
	/// Source text of the token.
	pub fn as_str(&self) -> &str {
		match self {
			Self::OpenList => "(",
			Self::CloseList => ")",
			Self::OpenBlob => "{",
			Self::CloseBlob => "}",
			Self::Atom(text) => text,
		}
	}
}

/// Tokenizer over text input, yielding `(offset, token)` pairs.
///
/// Delimiters are always tokens of their own, so `(1 2)3` and `( 1 2 ) 3`
/// tokenize the same way.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
	input: &'a str,
	pos: usize,
}

impl<'a> Tokens<'a> {
	/// Start tokenizing at the beginning of `input`.
	pub fn new(input: &'a str) -> Self {
		Self { input, pos: 0 }
	}

	/// Current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}
}

impl<'a> Iterator for Tokens<'a> {
	type Item = (usize, Token<'a>);

	fn next(&mut self) -> Option<Self::Item> {
		let bytes = self.input.as_bytes();
		while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
			self.pos += 1;
		}

		let start = self.pos;
		let first = *bytes.get(start)?;
		let token = match first {
			b'(' => Token::OpenList,
			b')' => Token::CloseList,
			b'{' => Token::OpenBlob,
			b'}' => Token::CloseBlob,
			_ => {
				let len = bytes[start..]
					.iter()
					.position(|byte| byte.is_ascii_whitespace() || is_delimiter(*byte))
					.unwrap_or(bytes.len() - start);
				self.pos = start + len;
				return Some((start, Token::Atom(&self.input[start..self.pos])));
			}
		};
		self.pos = start + 1;
		Some((start, token))
	}
}

fn is_delimiter(byte: u8) -> bool {
	matches!(byte, b'(' | b')' | b'{' | b'}')
}

/// Parse `input` into a new bag.
pub fn parse(input: &str, opt: &ParseOptions) -> Result<Bag> {
	let mut bag = Bag::new();
	parse_into(&mut bag, input, opt)?;
	Ok(bag)
}

/// Clear `bag` and parse `input` into it.
///
/// On error the bag keeps the elements parsed before the failure.
pub fn parse_into(bag: &mut Bag, input: &str, opt: &ParseOptions) -> Result<()> {
	bag.clear();
	let mut tokens = Tokens::new(input);
	parse_bag(&mut tokens, bag, opt, 0, None)
}

fn parse_bag(tokens: &mut Tokens<'_>, bag: &mut Bag, opt: &ParseOptions, depth: u32, open_at: Option<usize>) -> Result<()> {
	if depth >= opt.max_depth {
		return Err(BagError::ParseDepthExceeded { max_depth: opt.max_depth });
	}

	while let Some((at, token)) = tokens.next() {
		match token {
			Token::OpenList => {
				let inner = bag.add_list();
				parse_bag(tokens, inner, opt, depth + 1, Some(at))?;
			}
			Token::CloseList if open_at.is_some() => return Ok(()),
			Token::CloseList | Token::CloseBlob => {
				return Err(BagError::UnexpectedClose {
					token: token.as_str().to_owned(),
					at,
				});
			}
			Token::OpenBlob => {
				let bytes = parse_blob(tokens, at)?;
				bag.push(Value::Blob(bytes));
			}
			Token::Atom(text) => bag.push(parse_atom(text, at)?),
		}
	}

	match open_at {
		Some(at) => Err(BagError::UnclosedList { at }),
		None => Ok(()),
	}
}

fn parse_blob(tokens: &mut Tokens<'_>, open_at: usize) -> Result<Vec<u8>> {
	let mut bytes = Vec::new();
	for (at, token) in tokens.by_ref() {
		match token {
			Token::CloseBlob => return Ok(bytes),
			Token::Atom(text) => bytes.push(parse_blob_byte(text).ok_or_else(|| BagError::InvalidBlobByte {
				token: text.to_owned(),
				at,
			})?),
			_ => {
				return Err(BagError::InvalidBlobByte {
					token: token.as_str().to_owned(),
					at,
				});
			}
		}
	}
	Err(BagError::UnclosedBlob { at: open_at })
}

fn parse_blob_byte(text: &str) -> Option<u8> {
	let value = text.parse::<i16>().ok()?;
	u8::try_from(value).ok().or_else(|| i8::try_from(value).ok().map(|byte| byte as u8))
}

fn parse_atom(text: &str, at: usize) -> Result<Value> {
	let invalid = || BagError::InvalidNumber {
		token: text.to_owned(),
		at,
	};

	if text.as_bytes().first().is_some_and(u8::is_ascii_alphabetic) {
		return Ok(Value::string(text));
	}
	if text.contains('.') {
		return text.parse::<f64>().map(Value::Double).map_err(|_| invalid());
	}
	text.parse::<i32>().map(Value::Int).map_err(|_| invalid())
}

pub(crate) fn write_bag(out: &mut impl fmt::Write, bag: &Bag) -> fmt::Result {
	for (idx, value) in bag.iter().enumerate() {
		if idx > 0 {
			out.write_char(' ')?;
		}
		write_value(out, value)?;
	}
	Ok(())
}

pub(crate) fn write_value(out: &mut impl fmt::Write, value: &Value) -> fmt::Result {
	match value {
		Value::Empty => Ok(()),
		Value::Int(item) => write!(out, "{item}"),
		Value::Double(item) => write_double(out, *item),
		Value::String(bytes) => out.write_str(&String::from_utf8_lossy(bytes)),
		Value::Blob(bytes) => {
			out.write_char('{')?;
			for (idx, byte) in bytes.iter().enumerate() {
				if idx > 0 {
					out.write_char(' ')?;
				}
				write!(out, "{}", *byte as i8)?;
			}
			out.write_char('}')
		}
		Value::List(inner) => {
			out.write_char('(')?;
			write_bag(out, inner)?;
			out.write_char(')')
		}
	}
}

fn write_double(out: &mut impl fmt::Write, value: f64) -> fmt::Result {
	let text = value.to_string();
	out.write_str(&text)?;
	if value.is_finite() && !text.contains('.') {
		out.write_str(".0")?;
	}
	Ok(())
}
