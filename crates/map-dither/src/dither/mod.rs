//! Dithering algorithms.
//!
//! Every algorithm turns packed `0xRRGGBB` pixels into palette matches, in
//! one of two output modes:
//!
//! - **in place**: the buffer is overwritten with the matched palette colors
//! - **indexed**: one palette index byte per pixel is written to a separate
//!   buffer and the input is left untouched
//!
//! For the same input, both modes pick the same palette entry for every
//! pixel.
//!
//! # Algorithms
//!
//! - **Error diffusion**: [`FloydSteinberg`], [`FilterLite`], [`StevensonArce`].
//!   Serpentine scan, integer kernels, sequential within a frame.
//! - **Ordered**: [`OrderedDither`] with a 2x2, 4x4 or 8x8 Bayer matrix.
//!   No state between pixels, rows are processed in parallel.
//! - **Random**: [`RandomDither`], bounded uniform noise before matching.
//!
//! All of them implement [`Dither`]. [`DitherAlgorithm`] is the closed set of
//! choices, parseable from the names used in configuration files.
//!
//! # Example
//!
//! ```
//! use map_dither::{ColorPalette, Dither, FloydSteinberg, Palette};
//!
//! let palette = Palette::from_hex(&[
//!     "#000", "#000", "#000", "#000", "#000000", "#FFFFFF",
//! ]).unwrap();
//! let colors = ColorPalette::build(palette);
//!
//! let frame = vec![0x808080u32; 4 * 2];
//! let indices = FloydSteinberg.dither_to_indices(&frame, 4, &colors);
//! assert!(indices.iter().all(|&i| i == 4 || i == 5));
//! ```

mod filter_lite;
mod floyd_steinberg;
mod kernel;
mod ordered;
mod random;
mod stevenson_arce;

pub use filter_lite::FilterLite;
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, Weight, FILTER_LITE, FLOYD_STEINBERG, STEVENSON_ARCE};
pub use ordered::{BayerSize, OrderedDither};
pub use random::{RandomDither, DEFAULT_RANDOM_WEIGHT};
pub use stevenson_arce::StevensonArce;

use std::fmt;
use std::str::FromStr;

use crate::palette::ColorPalette;

/// Dither algorithm selection.
///
/// Parses from and displays as the kebab-case names used in stream
/// configuration:
///
/// ```
/// use map_dither::{BayerSize, DitherAlgorithm};
///
/// let algo: DitherAlgorithm = "ordered-4".parse().unwrap();
/// assert_eq!(algo, DitherAlgorithm::Ordered(BayerSize::Four));
/// assert_eq!(algo.to_string(), "ordered-4");
/// assert!("sierra".parse::<DitherAlgorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Floyd-Steinberg error diffusion, 4 neighbors over one row ahead.
    #[default]
    FloydSteinberg,

    /// Filter-Lite (Sierra 2-4A) error diffusion, 3 neighbors.
    ///
    /// Cheapest of the diffusion kernels; half of the error goes forward.
    FilterLite,

    /// Stevenson-Arce error diffusion, 12 neighbors over two rows ahead.
    ///
    /// Widest spread, slowest of the three.
    StevensonArce,

    /// Ordered dithering with a Bayer threshold matrix.
    Ordered(BayerSize),

    /// Per-channel uniform noise in `[-weight, weight]` before matching.
    Random {
        /// Noise amplitude per channel
        weight: u8,
    },
}

impl DitherAlgorithm {
    /// Every accepted name, in display order.
    pub const NAMES: [&'static str; 7] = [
        "floyd-steinberg",
        "filter-lite",
        "stevenson-arce",
        "ordered-2",
        "ordered-4",
        "ordered-8",
        "random",
    ];

    /// Whether the algorithm carries error between pixels.
    ///
    /// Error diffusion needs [`ErrorRows`] scratch and a sequential scan.
    pub fn diffuses_error(&self) -> bool {
        matches!(
            self,
            DitherAlgorithm::FloydSteinberg
                | DitherAlgorithm::FilterLite
                | DitherAlgorithm::StevensonArce
        )
    }

    /// Error rows needed by the algorithm (0 when it keeps no state).
    pub fn error_depth(&self) -> usize {
        match self {
            DitherAlgorithm::FloydSteinberg => FLOYD_STEINBERG.depth(),
            DitherAlgorithm::FilterLite => FILTER_LITE.depth(),
            DitherAlgorithm::StevensonArce => STEVENSON_ARCE.depth(),
            DitherAlgorithm::Ordered(_) | DitherAlgorithm::Random { .. } => 0,
        }
    }

    /// The same choice with a different noise amplitude.
    ///
    /// Only affects [`DitherAlgorithm::Random`].
    pub fn with_random_weight(self, weight: u8) -> Self {
        match self {
            DitherAlgorithm::Random { .. } => DitherAlgorithm::Random { weight },
            other => other,
        }
    }

    /// Instantiate the algorithm.
    ///
    /// `seed` only affects random dithering; `None` draws from the thread
    /// RNG on every call.
    pub fn strategy(&self, seed: Option<u64>) -> Box<dyn Dither + Send + Sync> {
        match *self {
            DitherAlgorithm::FloydSteinberg => Box::new(FloydSteinberg),
            DitherAlgorithm::FilterLite => Box::new(FilterLite),
            DitherAlgorithm::StevensonArce => Box::new(StevensonArce),
            DitherAlgorithm::Ordered(size) => Box::new(OrderedDither::new(size)),
            DitherAlgorithm::Random { weight } => Box::new(RandomDither::new(weight, seed)),
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::FilterLite => "filter-lite",
            DitherAlgorithm::StevensonArce => "stevenson-arce",
            DitherAlgorithm::Ordered(BayerSize::Two) => "ordered-2",
            DitherAlgorithm::Ordered(BayerSize::Four) => "ordered-4",
            DitherAlgorithm::Ordered(BayerSize::Eight) => "ordered-8",
            DitherAlgorithm::Random { .. } => "random",
        };
        f.write_str(name)
    }
}

/// Error returned when an algorithm name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    name: String,
}

impl ParseAlgorithmError {
    /// The rejected name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown dither algorithm '{}' (expected one of: {})",
            self.name,
            DitherAlgorithm::NAMES.join(", ")
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for DitherAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floyd-steinberg" => Ok(DitherAlgorithm::FloydSteinberg),
            "filter-lite" => Ok(DitherAlgorithm::FilterLite),
            "stevenson-arce" => Ok(DitherAlgorithm::StevensonArce),
            "ordered-2" => Ok(DitherAlgorithm::Ordered(BayerSize::Two)),
            "ordered-4" => Ok(DitherAlgorithm::Ordered(BayerSize::Four)),
            "ordered-8" => Ok(DitherAlgorithm::Ordered(BayerSize::Eight)),
            "random" => Ok(DitherAlgorithm::Random {
                weight: DEFAULT_RANDOM_WEIGHT,
            }),
            _ => Err(ParseAlgorithmError { name: s.to_string() }),
        }
    }
}

/// A dithering algorithm.
///
/// Implementors only provide the two output modes with caller-owned scratch;
/// the allocating conveniences are derived from them.
///
/// # Panics
///
/// Every method panics if `width` is zero, the buffer is empty, or the
/// buffer length is not a multiple of `width`. Indexed output also panics
/// if `out` is not exactly as long as the input.
pub trait Dither {
    /// Replace every pixel with its matched palette color.
    ///
    /// `rows` is scratch space; its previous contents are discarded.
    fn dither_in_place(
        &self,
        buffer: &mut [u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
    );

    /// Write the matched palette index of every pixel to `out`.
    ///
    /// `buffer` is not modified. `rows` is scratch space; its previous
    /// contents are discarded.
    fn dither_into(
        &self,
        buffer: &[u32],
        width: usize,
        palette: &ColorPalette,
        rows: &mut ErrorRows,
        out: &mut [u8],
    );

    /// In-place dithering with freshly allocated scratch.
    fn dither(&self, buffer: &mut [u32], width: usize, palette: &ColorPalette) {
        let mut rows = ErrorRows::new();
        self.dither_in_place(buffer, width, palette, &mut rows);
    }

    /// Indexed dithering into a new vector.
    fn dither_to_indices(&self, buffer: &[u32], width: usize, palette: &ColorPalette) -> Vec<u8> {
        let mut out = vec![0u8; buffer.len()];
        let mut rows = ErrorRows::new();
        self.dither_into(buffer, width, palette, &mut rows, &mut out);
        out
    }
}

/// Sliding window of accumulated diffusion error.
///
/// Holds `depth` rows of per-channel integer error in one flat allocation.
/// Row `head` belongs to the scan line being processed; a kernel tap `dy`
/// rows below lands in row `(head + dy) % depth`. When a scan line is done,
/// its row is cleared and becomes the farthest row ahead.
///
/// Keeping one `ErrorRows` per stream and passing it to every frame avoids
/// reallocating; [`prepare`](Self::prepare) zeroes it before each frame so
/// nothing carries over.
#[derive(Debug, Clone, Default)]
pub struct ErrorRows {
    cells: Vec<[i32; 3]>,
    width: usize,
    depth: usize,
    head: usize,
}

impl ErrorRows {
    /// Empty scratch; sized on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch already sized for `width` columns and `depth` rows.
    pub fn with_size(width: usize, depth: usize) -> Self {
        let mut rows = Self::new();
        rows.prepare(width, depth);
        rows
    }

    /// Resize to `width` x `depth` and zero every cell.
    ///
    /// Keeps the existing allocation when it is large enough.
    pub fn prepare(&mut self, width: usize, depth: usize) {
        self.cells.clear();
        self.cells.resize(width * depth, [0; 3]);
        self.width = width;
        self.depth = depth;
        self.head = 0;
    }

    /// Columns per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows held.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Error accumulated for column `x` of the current scan line.
    #[inline(always)]
    pub fn get(&self, x: usize) -> [i32; 3] {
        self.cells[self.head * self.width + x]
    }

    /// Accumulate `error` into column `x`, `dy` rows below the current one.
    #[inline(always)]
    pub fn add(&mut self, x: usize, dy: usize, error: [i32; 3]) {
        let row = (self.head + dy) % self.depth;
        let cell = &mut self.cells[row * self.width + x];
        cell[0] += error[0];
        cell[1] += error[1];
        cell[2] += error[2];
    }

    /// Retire the current scan line.
    pub fn advance(&mut self) {
        let start = self.head * self.width;
        self.cells[start..start + self.width].fill([0; 3]);
        self.head = (self.head + 1) % self.depth;
    }
}

// ============================================================================
// Shared dithering infrastructure
// ============================================================================

/// Validate frame geometry, returning the height.
///
/// # Panics
///
/// On zero width, empty buffer or a length that is not a multiple of width.
pub(crate) fn check_frame(len: usize, width: usize) -> usize {
    assert!(width > 0, "frame width must be greater than zero");
    assert!(len > 0, "frame buffer is empty");
    assert!(
        len % width == 0,
        "frame buffer length {} is not a multiple of width {}",
        len,
        width
    );
    len / width
}

/// Panic unless the index buffer matches the frame.
pub(crate) fn check_output(len: usize, out_len: usize) {
    assert!(
        out_len == len,
        "index buffer holds {} entries but the frame has {} pixels",
        out_len,
        len
    );
}

/// Split a packed pixel into signed channels.
#[inline(always)]
pub(crate) fn channels(rgb: u32) -> [i32; 3] {
    [
        (rgb >> 16 & 0xFF) as i32,
        (rgb >> 8 & 0xFF) as i32,
        (rgb & 0xFF) as i32,
    ]
}

/// Where matched pixels go.
///
/// Error diffusion is written once against this trait and monomorphized
/// for both output modes.
pub(crate) trait PixelTarget {
    /// Number of pixels in the frame.
    fn len(&self) -> usize;

    /// Original packed color of pixel `i`.
    fn source(&self, i: usize) -> u32;

    /// Record the match for pixel `i`.
    fn emit(&mut self, i: usize, color: u32, index: u8);
}

/// Overwrites the frame with matched colors.
pub(crate) struct InPlace<'a>(pub &'a mut [u32]);

impl PixelTarget for InPlace<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    fn source(&self, i: usize) -> u32 {
        self.0[i]
    }

    #[inline(always)]
    fn emit(&mut self, i: usize, color: u32, _index: u8) {
        self.0[i] = color;
    }
}

/// Writes palette indices next to an untouched frame.
pub(crate) struct Indexed<'a> {
    pub src: &'a [u32],
    pub out: &'a mut [u8],
}

impl PixelTarget for Indexed<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn source(&self, i: usize) -> u32 {
        self.src[i]
    }

    #[inline(always)]
    fn emit(&mut self, i: usize, _color: u32, index: u8) {
        self.out[i] = index;
    }
}

/// Serpentine error diffusion with an integer kernel.
///
/// Even rows run left to right, odd rows right to left with the kernel
/// mirrored. Each pixel gets its accumulated error added and clamped to
/// 0..=255 before matching; the error passed on is measured from the
/// clamped value. Taps that fall outside the frame are dropped.
pub(crate) fn diffuse<T: PixelTarget>(
    target: &mut T,
    width: usize,
    palette: &ColorPalette,
    kernel: &Kernel,
    rows: &mut ErrorRows,
) {
    let height = check_frame(target.len(), width);
    rows.prepare(width, kernel.depth());

    for y in 0..height {
        let reverse = y % 2 == 1;

        for step in 0..width {
            let x = if reverse { width - 1 - step } else { step };
            let idx = y * width + x;

            let raw = channels(target.source(idx));
            let acc = rows.get(x);
            let r = (raw[0] + acc[0]).clamp(0, 255);
            let g = (raw[1] + acc[1]).clamp(0, 255);
            let b = (raw[2] + acc[2]).clamp(0, 255);

            let (index, color) = palette.best_match(r as u8, g as u8, b as u8);
            let chosen = channels(color);
            let delta = [r - chosen[0], g - chosen[1], b - chosen[2]];

            for &(dx, dy, weight) in kernel.entries {
                let nx = if reverse {
                    x as isize - dx as isize
                } else {
                    x as isize + dx as isize
                };
                if nx < 0 || nx as usize >= width || y + dy >= height {
                    continue;
                }
                rows.add(
                    nx as usize,
                    dy,
                    [
                        weight.apply(delta[0]),
                        weight.apply(delta[1]),
                        weight.apply(delta[2]),
                    ],
                );
            }

            target.emit(idx, color, index);
        }

        rows.advance();
    }
}

/// Error diffusion in place.
pub(crate) fn diffuse_in_place(
    buffer: &mut [u32],
    width: usize,
    palette: &ColorPalette,
    kernel: &Kernel,
    rows: &mut ErrorRows,
) {
    diffuse(&mut InPlace(buffer), width, palette, kernel, rows);
}

/// Error diffusion into an index buffer.
pub(crate) fn diffuse_into(
    buffer: &[u32],
    width: usize,
    palette: &ColorPalette,
    kernel: &Kernel,
    rows: &mut ErrorRows,
    out: &mut [u8],
) {
    check_output(buffer.len(), out.len());
    diffuse(&mut Indexed { src: buffer, out }, width, palette, kernel, rows);
}
