//! Ordered palette of representable colors.
//!
//! A [`Palette`] is the validated color list a lookup table is built from.
//! Indices 0-3 are reserved (transparent on Minecraft maps) and are never
//! selected by nearest-color matching.

use super::error::PaletteError;
use crate::color::Rgb;

/// Number of leading palette slots that are never matched.
pub const RESERVED_ENTRIES: usize = 4;

/// Smallest accepted palette: the reserved slots plus one selectable color.
pub const MIN_COLORS: usize = RESERVED_ENTRIES + 1;

/// Largest accepted palette: every index must fit in one byte.
pub const MAX_COLORS: usize = 256;

/// An ordered, immutable list of at most 256 colors.
///
/// # Example
///
/// ```
/// use map_dither::{Palette, Rgb};
///
/// let transparent = Rgb::new(0, 0, 0);
/// let colors = [
///     transparent, transparent, transparent, transparent,
///     Rgb::new(0, 0, 0),
///     Rgb::new(255, 255, 255),
/// ];
/// let palette = Palette::new(&colors).unwrap();
///
/// assert_eq!(palette.len(), 6);
/// assert_eq!(palette.selectable().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from an ordered color list.
    ///
    /// Duplicate entries are allowed; nearest-color matching keeps the
    /// lowest index among equally distant candidates.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::TooFewColors`] if there is no entry past the reserved slots
    /// - [`PaletteError::TooManyColors`] if there are more than 256 entries
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.len() < MIN_COLORS {
            return Err(PaletteError::TooFewColors { len: colors.len() });
        }
        if colors.len() > MAX_COLORS {
            return Err(PaletteError::TooManyColors { len: colors.len() });
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from hex color strings.
    ///
    /// # Example
    ///
    /// ```
    /// use map_dither::Palette;
    ///
    /// let palette = Palette::from_hex(&[
    ///     "#000", "#000", "#000", "#000", "#000000", "#FFFFFF",
    /// ]).unwrap();
    /// assert_eq!(palette.len(), 6);
    /// ```
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| s.as_ref().parse::<Rgb>().map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Number of entries, reserved slots included.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All entries in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Entries that nearest-color matching may select, with their indices.
    pub fn selectable(&self) -> impl Iterator<Item = (usize, Rgb)> + '_ {
        self.colors
            .iter()
            .copied()
            .enumerate()
            .skip(RESERVED_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(n: usize) -> Vec<Rgb> {
        (0..n).map(|i| Rgb::new(i as u8, i as u8, i as u8)).collect()
    }

    #[test]
    fn test_rejects_reserved_only() {
        assert_eq!(
            Palette::new(&colors(4)),
            Err(PaletteError::TooFewColors { len: 4 })
        );
        assert_eq!(
            Palette::new(&[]),
            Err(PaletteError::TooFewColors { len: 0 })
        );
    }

    #[test]
    fn test_rejects_oversized() {
        assert_eq!(
            Palette::new(&colors(257)),
            Err(PaletteError::TooManyColors { len: 257 })
        );
        assert!(Palette::new(&colors(256)).is_ok());
    }

    #[test]
    fn test_selectable_skips_reserved() {
        let palette = Palette::new(&colors(7)).unwrap();
        let indices: Vec<usize> = palette.selectable().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![4, 5, 6]);
    }

    #[test]
    fn test_from_hex_propagates_parse_error() {
        let err = Palette::from_hex(&["#000", "#000", "#000", "#000", "nope"]).unwrap_err();
        assert!(matches!(err, PaletteError::ParseColor(_)));
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut list = colors(5);
        list.push(list[4]);
        assert!(Palette::new(&list).is_ok());
    }
}
