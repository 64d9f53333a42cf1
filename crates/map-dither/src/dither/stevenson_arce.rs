//! Stevenson-Arce error diffusion dithering algorithm.
//!
//! Stevenson-Arce spreads the error over 12 neighbors on the current row
//! and the two rows below it, reaching two columns to either side. It needs
//! three error rows and is the slowest of the diffusion kernels, but gives
//! the least directional texture.

use crate::palette::ColorPalette;

use super::{diffuse_in_place, diffuse_into, Dither, ErrorRows, STEVENSON_ARCE};

/// Stevenson-Arce error diffusion dithering.
///
/// ```text
///                X   32  12
///    12  26  30  16  12
///     5  12  26  12   5     (/200)
/// ```
///
/// Each tap computes `d * w / 200` with truncation toward zero.
pub struct StevensonArce;

impl Dither for StevensonArce {
    fn dither_in_place(
        &self,
        buffer: &mut [u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
    ) {
        diffuse_in_place(buffer, width, palette, &STEVENSON_ARCE, rows);
    }

    fn dither_into(
        &self,
        buffer: &[u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
        out: &mut [u8],
    ) {
        diffuse_into(buffer, width, palette, &STEVENSON_ARCE, rows, out);
    }
}
