#![allow(clippy::module_inception)]

//! map-dither: palette-indexed dithering for Minecraft map surfaces
//!
//! Minecraft maps show one byte per pixel, each byte selecting one of a
//! fixed set of shaded colors. This library converts truecolor frames
//! (packed `0xRRGGBB`, row-major) into those bytes, or into the palette
//! colors they stand for, fast enough to run on every frame of a video.
//!
//! # Quick Start
//!
//! Build the palette once, then keep a [`MapDitherer`] per stream:
//!
//! ```
//! use map_dither::{ColorPalette, DitherAlgorithm, MapDitherer, Palette};
//!
//! let palette = Palette::from_hex(&[
//!     "#000", "#000", "#000", "#000", // reserved
//!     "#000000", "#FFFFFF",
//! ]).unwrap();
//! let colors = ColorPalette::build(palette);
//!
//! let mut ditherer = MapDitherer::new(colors).algorithm(DitherAlgorithm::FilterLite);
//! let frame = vec![0x808080u32; 8 * 2];
//! let indices = ditherer.dither_to_indices(&frame, 8);
//!
//! assert_eq!(indices.len(), 16);
//! assert!(indices.iter().all(|&i| i == 4 || i == 5));
//! ```
//!
//! For the real map colors use [`MinecraftMapPalette`]:
//!
//! ```no_run
//! use map_dither::{ColorPalette, MinecraftMapPalette};
//!
//! let colors = ColorPalette::build(MinecraftMapPalette::palette());
//! assert_eq!(colors.len(), 248);
//! ```
//!
//! # Palette Lookup
//!
//! Matching a pixel to the palette is a single table read. [`ColorPalette`]
//! precomputes, for every color with each channel quantized to 7 bits, the
//! nearest palette entry under a red-weighted squared distance:
//!
//! ```text
//! red_avg  = (r1 + r2) / 2
//! distance = (2 + red_avg/256)         * dr²
//!          + 4                         * dg²
//!          + (2 + (255 - red_avg)/256) * db²
//! ```
//!
//! Indices 0-3 are transparent on maps and never chosen. The two tables
//! (index and packed color) take 10 MiB together and are built once on the
//! rayon pool; clones share them.
//!
//! # Dithering Algorithms
//!
//! [`DitherAlgorithm`] is the closed set of choices:
//!
//! - Floyd-Steinberg, Filter-Lite and Stevenson-Arce error diffusion, using
//!   integer kernels and serpentine scanning
//! - Ordered dithering with 2x2, 4x4 or 8x8 Bayer matrices (row-parallel)
//! - Random dithering with bounded uniform noise
//!
//! Every algorithm implements [`Dither`] with an in-place mode (the frame
//! is overwritten with palette colors) and an indexed mode (one index byte
//! per pixel). Both modes choose the same entry for every pixel.
//!
//! # Preconditions
//!
//! A zero width, an empty frame, or a frame whose length is not a multiple
//! of its width is a caller bug and panics. Palette problems are reported
//! as [`PaletteError`].

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;

#[cfg(test)]
mod domain_tests;

pub use api::{build_palette, dither, dither_to_indices, DitherError, MapDitherer};
pub use color::Rgb;
pub use dither::{
    BayerSize, Dither, DitherAlgorithm, ErrorRows, FilterLite, FloydSteinberg, OrderedDither,
    ParseAlgorithmError, RandomDither, StevensonArce,
};
pub use output::DitheredFrame;
pub use palette::{ColorPalette, MinecraftMapPalette, Palette, PaletteError, ParseColorError};
