//! Typed heterogeneous bag of tagged values with a flat binary codec and a text form.

/// Value model, bag container, binary and text codecs, and framing hooks.
pub mod bag;
