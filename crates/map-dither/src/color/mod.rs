//! Color types.
//!
//! - [`Rgb`]: 8-bit-per-channel color, convertible to and from the packed
//!   `0xRRGGBB` integers frames are delivered in.

mod rgb;

pub use rgb::Rgb;
