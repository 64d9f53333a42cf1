//! DitheredFrame: palette indices plus the geometry and palette they refer to.
//!
//! [`DitheredFrame`] is what indexed dithering hands to a map surface. The
//! index bytes are canonical; RGB views are computed on demand by looking
//! the indices up in the palette.

use crate::palette::ColorPalette;

/// The indexed output of one dithered frame.
///
/// Stores one `u8` palette index per pixel in row-major order, along with
/// the frame dimensions and a handle to the palette used.
///
/// # Example
///
/// ```
/// use map_dither::{ColorPalette, DitheredFrame, Palette};
///
/// let palette = Palette::from_hex(&[
///     "#000", "#000", "#000", "#000", "#000000", "#FFFFFF",
/// ]).unwrap();
/// let colors = ColorPalette::build(palette);
///
/// // a 2x2 checkerboard
/// let frame = DitheredFrame::new(vec![4, 5, 5, 4], 2, 2, colors);
///
/// assert_eq!(frame.height(), 2);
/// assert_eq!(frame.row(1), &[5, 4]);
/// assert_eq!(frame.to_packed(), vec![0x000000, 0xFFFFFF, 0xFFFFFF, 0x000000]);
/// ```
#[derive(Debug, Clone)]
pub struct DitheredFrame {
    /// Palette indices, one per pixel, row-major order.
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: ColorPalette,
}

impl DitheredFrame {
    /// Wrap dithered indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: ColorPalette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Take ownership of the index bytes.
    pub fn into_indices(self) -> Vec<u8> {
        self.indices
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Index bytes of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.indices[y * self.width..(y + 1) * self.width]
    }

    /// Packed `0xRRGGBB` color of every pixel.
    pub fn to_packed(&self) -> Vec<u32> {
        let palette = self.palette.palette();
        self.indices
            .iter()
            .map(|&idx| palette.color(idx as usize).packed())
            .collect()
    }

    /// RGB bytes in `[R, G, B, R, G, B, ...]` layout, `width * height * 3` long.
    pub fn to_rgb(&self) -> Vec<u8> {
        let palette = self.palette.palette();
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            let c = palette.color(idx as usize);
            rgb.extend_from_slice(&[c.r, c.g, c.b]);
        }
        rgb
    }
}
