//! Shared palette handle used by every dither call.

use std::sync::Arc;

use super::lookup::{key, LookupTable};
use super::palette::Palette;
use crate::color::Rgb;

/// A palette together with its nearest-color tables.
///
/// Building one is expensive (see [`LookupTable::build`]); cloning one is an
/// `Arc` bump. The tables are never mutated after construction, so a single
/// value can be read from any number of threads at once.
///
/// # Example
///
/// ```
/// use map_dither::{ColorPalette, Palette, Rgb};
///
/// let palette = Palette::from_hex(&[
///     "#000", "#000", "#000", "#000", "#000000", "#FFFFFF",
/// ]).unwrap();
/// let colors = ColorPalette::build(palette);
///
/// assert_eq!(colors.best_index(30, 30, 30), 4);
/// assert_eq!(colors.best_color(220, 220, 220), 0xFFFFFF);
/// ```
#[derive(Debug, Clone)]
pub struct ColorPalette {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    palette: Palette,
    table: LookupTable,
}

impl ColorPalette {
    /// Build the lookup tables for `palette`.
    pub fn build(palette: Palette) -> Self {
        let table = LookupTable::build(&palette);
        Self {
            inner: Arc::new(Inner { palette, table }),
        }
    }

    /// Nearest selectable palette color, packed `0xRRGGBB`.
    #[inline(always)]
    pub fn best_color(&self, r: u8, g: u8, b: u8) -> u32 {
        self.inner.table.color_at(key(r, g, b))
    }

    /// Index of the nearest selectable palette color.
    #[inline(always)]
    pub fn best_index(&self, r: u8, g: u8, b: u8) -> u8 {
        self.inner.table.index_at(key(r, g, b))
    }

    /// Index and packed color of the nearest entry, from a single key.
    #[inline(always)]
    pub fn best_match(&self, r: u8, g: u8, b: u8) -> (u8, u32) {
        let k = key(r, g, b);
        (self.inner.table.index_at(k), self.inner.table.color_at(k))
    }

    /// Nearest color for a packed `0xRRGGBB` value.
    #[inline]
    pub fn best_color_packed(&self, rgb: u32) -> u32 {
        let c = Rgb::from_packed(rgb);
        self.best_color(c.r, c.g, c.b)
    }

    /// The source palette.
    pub fn palette(&self) -> &Palette {
        &self.inner.palette
    }

    /// Number of palette entries, reserved slots included.
    pub fn len(&self) -> usize {
        self.inner.palette.len()
    }

    /// Always `false`; see [`Palette::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.palette.is_empty()
    }

    /// Key-indexed table of palette indices.
    pub fn color_map(&self) -> &[u8] {
        self.inner.table.indices()
    }

    /// Key-indexed table of packed palette colors.
    pub fn full_color_map(&self) -> &[u32] {
        self.inner.table.colors()
    }
}
