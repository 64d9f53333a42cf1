//! Public API for the map-dither crate.
//!
//! This module provides the high-level API: the [`MapDitherer`] builder, the
//! one-shot functions and the [`DitherError`] unified error type.

mod builder;
mod error;
mod functions;

pub use builder::MapDitherer;
pub use error::DitherError;
pub use functions::{build_palette, dither, dither_to_indices};
