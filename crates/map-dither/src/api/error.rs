//! Unified error type for the map-dither public API.
//!
//! [`DitherError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use crate::dither::ParseAlgorithmError;
use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the map-dither public API.
///
/// # Example
///
/// ```
/// use map_dither::{DitherAlgorithm, DitherError, Palette};
///
/// fn setup(name: &str) -> Result<(Palette, DitherAlgorithm), DitherError> {
///     let palette = Palette::from_hex(&["#000", "#000", "#000", "#000", "#FFF"])?;
///     let algorithm = name.parse()?;
///     Ok((palette, algorithm))
/// }
///
/// assert!(setup("ordered-8").is_ok());
/// assert!(setup("halftone").is_err());
/// ```
#[derive(Debug)]
pub enum DitherError {
    /// Palette validation error (too few or too many entries, or parse error)
    Palette(PaletteError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
    /// Unknown algorithm name
    UnknownAlgorithm(ParseAlgorithmError),
}

impl fmt::Display for DitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherError::Palette(err) => write!(f, "palette error: {}", err),
            DitherError::ParseColor(err) => write!(f, "color parse error: {}", err),
            DitherError::UnknownAlgorithm(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherError::Palette(err) => Some(err),
            DitherError::ParseColor(err) => Some(err),
            DitherError::UnknownAlgorithm(err) => Some(err),
        }
    }
}

impl From<PaletteError> for DitherError {
    fn from(err: PaletteError) -> Self {
        DitherError::Palette(err)
    }
}

impl From<ParseColorError> for DitherError {
    fn from(err: ParseColorError) -> Self {
        DitherError::ParseColor(err)
    }
}

impl From<ParseAlgorithmError> for DitherError {
    fn from(err: ParseAlgorithmError) -> Self {
        DitherError::UnknownAlgorithm(err)
    }
}
