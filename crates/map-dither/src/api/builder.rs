//! MapDitherer builder -- the reusable per-stream entry point.
//!
//! [`MapDitherer`] binds a palette to an algorithm and keeps the error-row
//! scratch between frames, so a stream dithering frame after frame only
//! allocates on its first frame or when the width changes.

use crate::dither::{check_frame, Dither, DitherAlgorithm, ErrorRows};
use crate::output::DitheredFrame;
use crate::palette::ColorPalette;

/// Reusable ditherer for one stream of frames.
///
/// # Design
///
/// - Constructor requires a built [`ColorPalette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - Dithering methods take `&mut self` because the error rows are pooled;
///   use one `MapDitherer` per stream, clone the [`ColorPalette`] freely
///
/// # Example
///
/// ```
/// use map_dither::{ColorPalette, DitherAlgorithm, MapDitherer, Palette};
///
/// let palette = Palette::from_hex(&[
///     "#000", "#000", "#000", "#000", "#000000", "#FFFFFF",
/// ]).unwrap();
/// let mut ditherer = MapDitherer::new(ColorPalette::build(palette))
///     .algorithm(DitherAlgorithm::StevensonArce);
///
/// let frame = vec![0x808080u32; 4 * 4];
/// let result = ditherer.dither_frame(&frame, 4);
///
/// assert_eq!(result.width(), 4);
/// assert_eq!(result.height(), 4);
/// ```
pub struct MapDitherer {
    palette: ColorPalette,
    algorithm: DitherAlgorithm,
    seed: Option<u64>,
    strategy: Box<dyn Dither + Send + Sync>,
    rows: ErrorRows,
}

impl MapDitherer {
    /// Create a ditherer using Floyd-Steinberg.
    pub fn new(palette: ColorPalette) -> Self {
        let algorithm = DitherAlgorithm::default();
        Self {
            palette,
            algorithm,
            seed: None,
            strategy: algorithm.strategy(None),
            rows: ErrorRows::new(),
        }
    }

    /// Select the dithering algorithm.
    ///
    /// ```
    /// use map_dither::{BayerSize, ColorPalette, DitherAlgorithm, MapDitherer, Palette};
    ///
    /// let palette = Palette::from_hex(&["#000", "#000", "#000", "#000", "#FFF"]).unwrap();
    /// let ditherer = MapDitherer::new(ColorPalette::build(palette))
    ///     .algorithm(DitherAlgorithm::Ordered(BayerSize::Eight));
    /// assert_eq!(ditherer.selected_algorithm().to_string(), "ordered-8");
    /// ```
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self.strategy = algorithm.strategy(self.seed);
        self
    }

    /// Make random dithering reproducible.
    ///
    /// Has no effect on the other algorithms.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.strategy = self.algorithm.strategy(self.seed);
        self
    }

    /// The algorithm in use.
    #[inline]
    pub fn selected_algorithm(&self) -> DitherAlgorithm {
        self.algorithm
    }

    /// The palette in use.
    #[inline]
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Overwrite `buffer` with matched palette colors.
    ///
    /// # Panics
    ///
    /// If `width` is zero, `buffer` is empty, or its length is not a
    /// multiple of `width`.
    pub fn dither_in_place(&mut self, buffer: &mut [u32], width: usize) {
        self.strategy
            .dither_in_place(buffer, width, &self.palette, &mut self.rows);
    }

    /// Write the palette index of every pixel to `out`.
    ///
    /// # Panics
    ///
    /// As [`dither_in_place`](Self::dither_in_place), and if `out` is not as
    /// long as `buffer`.
    pub fn dither_into(&mut self, buffer: &[u32], width: usize, out: &mut [u8]) {
        self.strategy
            .dither_into(buffer, width, &self.palette, &mut self.rows, out);
    }

    /// Palette indices for `buffer` in a new vector.
    pub fn dither_to_indices(&mut self, buffer: &[u32], width: usize) -> Vec<u8> {
        let mut out = vec![0u8; buffer.len()];
        self.dither_into(buffer, width, &mut out);
        out
    }

    /// Dither `buffer` into a [`DitheredFrame`].
    pub fn dither_frame(&mut self, buffer: &[u32], width: usize) -> DitheredFrame {
        let height = check_frame(buffer.len(), width);
        let indices = self.dither_to_indices(buffer, width);
        DitheredFrame::new(indices, width, height, self.palette.clone())
    }
}

impl std::fmt::Debug for MapDitherer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapDitherer")
            .field("algorithm", &self.algorithm)
            .field("seed", &self.seed)
            .field("palette_len", &self.palette.len())
            .finish()
    }
}
