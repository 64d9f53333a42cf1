//! Filter-Lite (Sierra 2-4A) error diffusion.

use crate::palette::ColorPalette;

use super::{diffuse_in_place, diffuse_into, Dither, ErrorRows, FILTER_LITE};

/// Filter-Lite error diffusion dithering.
///
/// ```text
///        X   2
///    1   1          (/4)
/// ```
///
/// Half of the error goes to the next pixel in scan order, a quarter to
/// each of the two pixels below and behind. Only three taps, so this is the
/// fastest of the diffusion kernels.
pub struct FilterLite;

impl Dither for FilterLite {
    fn dither_in_place(
        &self,
        buffer: &mut [u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
    ) {
        diffuse_in_place(buffer, width, palette, &FILTER_LITE, rows);
    }

    fn dither_into(
        &self,
        buffer: &[u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
        out: &mut [u8],
    ) {
        diffuse_into(buffer, width, palette, &FILTER_LITE, rows, out);
    }
}
