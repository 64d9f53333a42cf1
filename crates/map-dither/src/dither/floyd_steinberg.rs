//! Floyd-Steinberg error diffusion dithering algorithm.
//!
//! Floyd-Steinberg distributes the quantization error to 4 neighbors, one
//! forward and three on the next row. Every tap shifts the error right by
//! four bits before multiplying, so residual errors smaller than 16 are
//! dropped rather than spread.

use crate::palette::ColorPalette;

use super::{diffuse_in_place, diffuse_into, Dither, ErrorRows, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// ```text
///        X   7
///    3   5   1      (/16)
/// ```
///
/// Two error rows are needed. Rows are scanned in serpentine order.
///
/// # Example
///
/// ```
/// use map_dither::{ColorPalette, Dither, FloydSteinberg, Palette};
///
/// let palette = Palette::from_hex(&[
///     "#000", "#000", "#000", "#000", "#000000", "#FFFFFF",
/// ]).unwrap();
/// let colors = ColorPalette::build(palette);
///
/// let mut frame = vec![0x808080u32; 3];
/// FloydSteinberg.dither(&mut frame, 3, &colors);
/// assert_eq!(frame, vec![0xFFFFFF, 0x000000, 0xFFFFFF]);
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither_in_place(
        &self,
        buffer: &mut [u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
    ) {
        diffuse_in_place(buffer, width, palette, &FLOYD_STEINBERG, rows);
    }

    fn dither_into(
        &self,
        buffer: &[u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
        out: &mut [u8],
    ) {
        diffuse_into(buffer, width, palette, &FLOYD_STEINBERG, rows, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::Palette;
    use pretty_assertions::assert_eq;

    fn create_test_palette() -> ColorPalette {
        let reserved = Rgb::new(0, 0, 0);
        let colors = [
            reserved,
            reserved,
            reserved,
            reserved,
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
        ];
        ColorPalette::build(Palette::new(&colors).unwrap())
    }

    #[test]
    fn test_floyd_steinberg_single_row() {
        let palette = create_test_palette();
        // 128 -> white (err -127, fwd -56), 72 -> black (err 72, fwd 28), 156 -> white
        let result = FloydSteinberg.dither_to_indices(&[0x808080; 3], 3, &palette);
        assert_eq!(result, vec![5, 4, 5]);
    }

    #[test]
    fn test_floyd_steinberg_serpentine_rows() {
        let palette = create_test_palette();
        let result = FloydSteinberg.dither_to_indices(&[0x808080; 6], 3, &palette);
        // second row is scanned right to left with the kernel mirrored
        assert_eq!(result, vec![5, 4, 5, 4, 5, 4]);
    }

    #[test]
    fn test_floyd_steinberg_exact_black() {
        let palette = create_test_palette();
        let result = FloydSteinberg.dither_to_indices(&[0x000000; 16], 4, &palette);
        assert!(result.iter().all(|&x| x == 4), "Pure black should all be 4");
    }

    #[test]
    fn test_floyd_steinberg_small_errors_absorbed() {
        let palette = create_test_palette();
        // 12 below black: every error is < 16 and shifts away to nothing
        let result = FloydSteinberg.dither_to_indices(&[0x0C0C0C; 64], 8, &palette);
        assert!(result.iter().all(|&x| x == 4));
    }

    #[test]
    fn test_floyd_steinberg_propagation() {
        let palette = create_test_palette();
        let width = 32;
        let frame = vec![0x4C4C4Cu32; width * 16]; // ~30% gray

        let result = FloydSteinberg.dither_to_indices(&frame, width, &palette);

        let white_ratio =
            result.iter().filter(|&&x| x == 5).count() as f32 / result.len() as f32;
        assert!(
            (white_ratio - 0.3).abs() < 0.1,
            "Expected ~0.3 white ratio, got {}",
            white_ratio
        );
    }

    #[test]
    fn test_floyd_steinberg_deterministic() {
        let palette = create_test_palette();
        let frame: Vec<u32> = (0..48u32).map(|i| i * 0x050301).collect();

        let mut a = frame.clone();
        let mut b = frame;
        FloydSteinberg.dither(&mut a, 8, &palette);
        FloydSteinberg.dither(&mut b, 8, &palette);
        assert_eq!(a, b);
    }
}
