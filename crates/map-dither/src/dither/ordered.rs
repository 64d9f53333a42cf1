//! Ordered (Bayer) dithering.
//!
//! Each pixel is nudged by a fixed threshold from a Bayer matrix, chosen by
//! the pixel's position, and then matched to the palette. There is no state
//! carried between pixels, so rows are independent and are processed on
//! the rayon pool.
//!
//! For an `n x n` matrix with ranks `1..=n²`, the bias at `(i, j)` is
//! `rank / n² - 0.5` and the offset added to every channel is
//! `bias * 255 / n²`. The matrix is indexed by `[x % n][y % n]`.

use rayon::prelude::*;

use crate::palette::ColorPalette;

use super::{channels, check_frame, check_output, Dither, ErrorRows};

const BAYER_2: [[u8; 2]; 2] = [[1, 3], [4, 2]];

const BAYER_4: [[u8; 4]; 4] = [[1, 9, 3, 11], [13, 5, 15, 7], [4, 12, 2, 10], [16, 8, 14, 6]];

const BAYER_8: [[u8; 8]; 8] = [
    [1, 49, 13, 61, 4, 52, 16, 64],
    [33, 17, 45, 29, 36, 20, 48, 32],
    [9, 57, 5, 53, 12, 60, 8, 56],
    [41, 25, 37, 21, 44, 28, 40, 24],
    [3, 51, 15, 63, 2, 50, 14, 62],
    [35, 19, 47, 31, 34, 18, 46, 30],
    [11, 59, 7, 55, 10, 58, 6, 54],
    [43, 27, 39, 23, 42, 26, 38, 22],
];

/// Bayer matrix dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BayerSize {
    /// 2x2 matrix: coarse pattern, strongest offsets
    Two,
    /// 4x4 matrix
    Four,
    /// 8x8 matrix: finest pattern, smallest offsets
    Eight,
}

impl BayerSize {
    /// Side length of the matrix.
    pub const fn n(self) -> usize {
        match self {
            BayerSize::Two => 2,
            BayerSize::Four => 4,
            BayerSize::Eight => 8,
        }
    }

    /// Raw rank at `(i, j)`, in `1..=n²`.
    pub fn rank(self, i: usize, j: usize) -> u8 {
        match self {
            BayerSize::Two => BAYER_2[i][j],
            BayerSize::Four => BAYER_4[i][j],
            BayerSize::Eight => BAYER_8[i][j],
        }
    }
}

/// Ordered dithering with a precomputed bias matrix.
#[derive(Debug, Clone)]
pub struct OrderedDither {
    n: usize,
    /// `bias[i * n + j] = rank(i, j) / n² - 0.5`
    bias: Vec<f32>,
    /// Channel offset scale, `255 / n²`
    spread: f32,
}

impl OrderedDither {
    /// Precompute the bias matrix for `size`.
    pub fn new(size: BayerSize) -> Self {
        let n = size.n();
        let cells = (n * n) as f32;
        let step = 1.0 / cells;
        let bias = (0..n * n)
            .map(|k| size.rank(k / n, k % n) as f32 * step - 0.5)
            .collect();
        Self {
            n,
            bias,
            spread: 255.0 / cells,
        }
    }

    /// Matrix side length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Offset added to every channel of the pixel at `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> f32 {
        self.spread * self.bias[(x % self.n) * self.n + y % self.n]
    }

    #[inline]
    fn adjust(&self, rgb: u32, x: usize, y: usize) -> (u8, u8, u8) {
        let offset = self.offset(x, y);
        let [r, g, b] = channels(rgb);
        let shift = |c: i32| ((c as f32 + offset) as i32).clamp(0, 255) as u8;
        (shift(r), shift(g), shift(b))
    }
}

impl Dither for OrderedDither {
    fn dither_in_place(
        &self,
        buffer: &mut [u32],
        width: usize,
        palette: &ColorPalette,
        _rows: &mut ErrorRows,
    ) {
        check_frame(buffer.len(), width);

        buffer
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    let (r, g, b) = self.adjust(*px, x, y);
                    *px = palette.best_color(r, g, b);
                }
            });
    }

    fn dither_into(
        &self,
        buffer: &[u32],
        width: usize,
        palette: &ColorPalette,
        _rows: &mut ErrorRows,
        out: &mut [u8],
    ) {
        check_frame(buffer.len(), width);
        check_output(buffer.len(), out.len());

        buffer
            .par_chunks(width)
            .zip(out.par_chunks_mut(width))
            .enumerate()
            .for_each(|(y, (src, dst))| {
                for (x, (&px, idx)) in src.iter().zip(dst.iter_mut()).enumerate() {
                    let (r, g, b) = self.adjust(px, x, y);
                    *idx = palette.best_index(r, g, b);
                }
            });
    }
}
