//! One-shot entry points.
//!
//! Convenience wrappers for callers that dither a single frame and do not
//! need to keep scratch around. Streams should hold a
//! [`MapDitherer`](crate::MapDitherer) instead.

use crate::color::Rgb;
use crate::dither::DitherAlgorithm;
use crate::palette::{ColorPalette, Palette, PaletteError};

/// Validate `colors` and build their lookup tables.
///
/// ```
/// use map_dither::{build_palette, MinecraftMapPalette};
///
/// let palette = build_palette(&MinecraftMapPalette::colors()[..8]).unwrap();
/// assert_eq!(palette.len(), 8);
/// ```
pub fn build_palette(colors: &[Rgb]) -> Result<ColorPalette, PaletteError> {
    Ok(ColorPalette::build(Palette::new(colors)?))
}

/// Dither `buffer` in place with freshly allocated scratch.
///
/// # Panics
///
/// If `width` is zero, `buffer` is empty, or its length is not a multiple
/// of `width`.
pub fn dither(
    algorithm: DitherAlgorithm,
    palette: &ColorPalette,
    buffer: &mut [u32],
    width: usize,
) {
    algorithm.strategy(None).dither(buffer, width, palette);
}

/// Palette indices for `buffer`, one byte per pixel.
///
/// # Panics
///
/// As [`dither`].
pub fn dither_to_indices(
    algorithm: DitherAlgorithm,
    palette: &ColorPalette,
    buffer: &[u32],
    width: usize,
) -> Vec<u8> {
    algorithm.strategy(None).dither_to_indices(buffer, width, palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_palette_rejects_short_lists() {
        let colors = vec![Rgb::new(1, 2, 3); 4];
        assert_eq!(
            build_palette(&colors).unwrap_err(),
            PaletteError::TooFewColors { len: 4 }
        );
    }

    #[test]
    fn test_dither_in_place_snaps() {
        let mut colors = vec![Rgb::default(); 4];
        colors.extend([Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
        let palette = build_palette(&colors).unwrap();

        let mut frame = vec![0x0A0A0A, 0xF5F5F5];
        dither(DitherAlgorithm::FilterLite, &palette, &mut frame, 2);
        // x0 passes 10 >> 1 forward, 245 + 5 still snaps to white
        assert_eq!(frame, vec![0x000000, 0xFFFFFF]);

        let indices = dither_to_indices(
            DitherAlgorithm::FilterLite,
            &palette,
            &[0x0A0A0A, 0xF5F5F5],
            2,
        );
        assert_eq!(indices, vec![4, 5]);
    }
}
