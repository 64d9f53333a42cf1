//! 24-bit RGB color type
//!
//! Frames arrive as packed `0xRRGGBB` integers (one per pixel). [`Rgb`] is the
//! unpacked view used for palette definitions and lookups.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A 24-bit RGB color, 8 bits per channel.
///
/// # Example
/// ```
/// use map_dither::Rgb;
///
/// let orange = Rgb::new(0xD8, 0x7F, 0x33);
/// assert_eq!(orange.packed(), 0xD87F33);
/// assert_eq!(Rgb::from_packed(0xD87F33), orange);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` integer. The top byte (alpha, if any) is ignored.
    #[inline]
    pub const fn from_packed(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16 & 0xFF) as u8,
            g: (rgb >> 8 & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Pack into `0xRRGGBB` with a zero top byte.
    #[inline]
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Scale every channel by `mult / 255`, truncating.
    ///
    /// This is how map shades are derived from a base color.
    ///
    /// ```
    /// use map_dither::Rgb;
    ///
    /// let grass = Rgb::new(127, 178, 56);
    /// assert_eq!(grass.shade(180), Rgb::new(89, 125, 39));
    /// assert_eq!(grass.shade(255), grass);
    /// ```
    #[inline]
    pub const fn shade(self, mult: u32) -> Self {
        Self {
            r: (self.r as u32 * mult / 255) as u8,
            g: (self.g as u32 * mult / 255) as u8,
            b: (self.b as u32 * mult / 255) as u8,
        }
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(rgb: u32) -> Self {
        Self::from_packed(rgb)
    }
}

impl From<Rgb> for u32 {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        rgb.packed()
    }
}

impl From<[u8; 3]> for Rgb {
    #[inline]
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color: `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// Case-insensitive, surrounding whitespace is trimmed.
    ///
    /// ```
    /// use map_dither::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::new(255, 255, 255));
    ///
    /// let red: Rgb = "f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Reject non-ASCII up front so the byte slicing below stays on char boundaries
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
