/// Binary decode command.
pub mod decode;
/// Text-to-binary encode command.
pub mod encode;
/// Structural summary command.
pub mod inspect;
/// Text/binary round-trip check command.
pub mod roundtrip;

#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
