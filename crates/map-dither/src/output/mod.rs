//! Output types for indexed dithering.
//!
//! [`DitheredFrame`] keeps the palette index bytes canonical and offers
//! packed-color and RGB-byte views computed from the palette.

mod dithered_frame;

pub use dithered_frame::DitheredFrame;
