//! Precomputed nearest-color tables.
//!
//! Every channel is quantized to 7 bits, giving a 2^21-entry key space that
//! covers the whole RGB cube. For each key the nearest selectable palette
//! entry is found once with a red-weighted squared distance; afterwards
//! matching a pixel is a single array read.
//!
//! The table build is the only expensive step (2M keys times up to 252
//! candidates), so it is split into 128 independent red slabs and run on the
//! rayon pool. Slabs share nothing, so the result does not depend on how the
//! pool schedules them.

use rayon::prelude::*;

use super::palette::{Palette, RESERVED_ENTRIES};
use crate::color::Rgb;

/// Number of keys in each table.
pub const TABLE_SIZE: usize = 1 << 21;

/// Keys covered by one red slab (all green/blue combinations).
const SLAB_SIZE: usize = 1 << 14;

/// Table key for a color: the top 7 bits of each channel.
///
/// ```
/// use map_dither::palette::key;
///
/// assert_eq!(key(0, 0, 0), 0);
/// assert_eq!(key(255, 255, 255), (1 << 21) - 1);
/// // the low bit of each channel is dropped
/// assert_eq!(key(201, 33, 7), key(200, 32, 6));
/// ```
#[inline(always)]
pub const fn key(r: u8, g: u8, b: u8) -> usize {
    ((r as usize) >> 1) << 14 | ((g as usize) >> 1) << 7 | (b as usize) >> 1
}

/// Red-weighted squared distance between two colors.
///
/// Evaluated in `f32` term by term so that ties resolve identically on
/// every platform.
#[inline]
pub fn weighted_distance(a: Rgb, b: Rgb) -> f32 {
    let red_avg = (a.r as i32 + b.r as i32) as f32 * 0.5;
    let dr = (a.r as i32 - b.r as i32) as f32;
    let dg = (a.g as i32 - b.g as i32) as f32;
    let db = (a.b as i32 - b.b as i32) as f32;
    let weight_r = 2.0f32 + red_avg * (1.0 / 256.0);
    let weight_g = 4.0f32;
    let weight_b = 2.0f32 + (255.0 - red_avg) * (1.0 / 256.0);
    weight_r * dr * dr + weight_g * dg * dg + weight_b * db * db
}

/// Index of the selectable palette entry nearest to `color`.
///
/// Candidates start after the reserved entries; on equal distance the
/// lower index wins.
pub fn nearest_index(palette: &Palette, color: Rgb) -> u8 {
    let mut best = RESERVED_ENTRIES;
    let mut best_distance = f32::MAX;
    for (idx, candidate) in palette.selectable() {
        let distance = weighted_distance(color, candidate);
        if distance < best_distance {
            best_distance = distance;
            best = idx;
        }
    }
    best as u8
}

/// The pair of nearest-color tables for one palette.
///
/// `indices[k]` is the chosen palette index for key `k`; `colors[k]` is the
/// packed `0xRRGGBB` value of that entry.
#[derive(Clone)]
pub struct LookupTable {
    indices: Box<[u8]>,
    colors: Box<[u32]>,
}

impl LookupTable {
    /// Build both tables for `palette` on the rayon pool.
    pub fn build(palette: &Palette) -> Self {
        let mut indices = vec![0u8; TABLE_SIZE].into_boxed_slice();

        indices
            .par_chunks_mut(SLAB_SIZE)
            .enumerate()
            .for_each(|(slab, out)| fill_slab(palette, slab, out));

        let colors = indices
            .par_iter()
            .map(|&idx| palette.color(idx as usize).packed())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self { indices, colors }
    }

    /// Palette index stored for `key`.
    #[inline(always)]
    pub fn index_at(&self, key: usize) -> u8 {
        self.indices[key]
    }

    /// Packed color stored for `key`.
    #[inline(always)]
    pub fn color_at(&self, key: usize) -> u32 {
        self.colors[key]
    }

    /// The full index table.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// The full packed-color table.
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }
}

impl std::fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupTable")
            .field("entries", &self.indices.len())
            .finish()
    }
}

/// Fill the 16384 keys that share red bucket `slab`.
fn fill_slab(palette: &Palette, slab: usize, out: &mut [u8]) {
    let r = (slab << 1) as u8;
    for (offset, slot) in out.iter_mut().enumerate() {
        let g = ((offset >> 7) << 1) as u8;
        let b = ((offset & 0x7F) << 1) as u8;
        *slot = nearest_index(palette, Rgb::new(r, g, b));
    }
}
