//! Random (noise) dithering.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::palette::ColorPalette;

use super::{channels, check_frame, check_output, Dither, ErrorRows};

/// Noise amplitude used when none is configured.
pub const DEFAULT_RANDOM_WEIGHT: u8 = 24;

/// Adds independent uniform noise in `[-weight, weight]` to every channel,
/// clamps, then matches to the palette.
///
/// With a seed the noise sequence restarts on every call, so the same
/// frame always dithers the same way. Without one each call draws from the
/// thread RNG.
///
/// ```
/// use map_dither::{ColorPalette, Dither, Palette, RandomDither};
///
/// let palette = Palette::from_hex(&[
///     "#000", "#000", "#000", "#000", "#000000", "#FFFFFF",
/// ]).unwrap();
/// let colors = ColorPalette::build(palette);
///
/// let dither = RandomDither::new(40, Some(7));
/// let frame = vec![0x808080u32; 16];
/// assert_eq!(
///     dither.dither_to_indices(&frame, 4, &colors),
///     dither.dither_to_indices(&frame, 4, &colors),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDither {
    weight: i32,
    seed: Option<u64>,
}

impl RandomDither {
    /// Noise of amplitude `weight`, optionally seeded.
    pub fn new(weight: u8, seed: Option<u64>) -> Self {
        Self {
            weight: weight as i32,
            seed,
        }
    }

    /// Noise amplitude.
    pub fn weight(&self) -> u8 {
        self.weight as u8
    }

    #[inline]
    fn jitter<R: Rng>(&self, rng: &mut R, rgb: u32) -> (u8, u8, u8) {
        let [r, g, b] = channels(rgb);
        let mut shift = |c: i32| {
            let noise = rng.gen_range(-self.weight..=self.weight);
            (c + noise).clamp(0, 255) as u8
        };
        (shift(r), shift(g), shift(b))
    }

    fn snap_all<R: Rng>(&self, rng: &mut R, buffer: &mut [u32], palette: &ColorPalette) {
        for px in buffer.iter_mut() {
            let (r, g, b) = self.jitter(rng, *px);
            *px = palette.best_color(r, g, b);
        }
    }

    fn index_all<R: Rng>(
        &self,
        rng: &mut R,
        buffer: &[u32],
        palette: &ColorPalette,
        out: &mut [u8],
    ) {
        for (&px, idx) in buffer.iter().zip(out.iter_mut()) {
            let (r, g, b) = self.jitter(rng, px);
            *idx = palette.best_index(r, g, b);
        }
    }
}

impl Dither for RandomDither {
    fn dither_in_place(
        &self,
        buffer: &mut [u32],
        width: usize,
        palette: &ColorPalette,
        _rows: &mut ErrorRows,
    ) {
        check_frame(buffer.len(), width);

        match self.seed {
            Some(seed) => self.snap_all(&mut StdRng::seed_from_u64(seed), buffer, palette),
            None => self.snap_all(&mut rand::thread_rng(), buffer, palette),
        }
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

        match self.seed {
            Some(seed) => self.index_all(&mut StdRng::seed_from_u64(seed), buffer, palette, out),
            None => self.index_all(&mut rand::thread_rng(), buffer, palette, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::Palette;

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
    fn test_zero_weight_is_plain_snap() {
        let palette = create_test_palette();
        let frame = [0x101010, 0xF0F0F0, 0x7A7A7A, 0x909090];
        let result = RandomDither::new(0, None).dither_to_indices(&frame, 2, &palette);
        assert_eq!(result, vec![4, 5, 4, 5]);
    }

    #[test]
    fn test_noise_is_bounded() {
        let palette = create_test_palette();
        // 20 away from black, weight 30: can never reach the midpoint
        let frame = vec![0x141414u32; 256];
        let result = RandomDither::new(30, None).dither_to_indices(&frame, 16, &palette);
        assert!(result.iter().all(|&i| i == 4));
    }

    #[test]
    fn test_noise_mixes_midtones() {
        let palette = create_test_palette();
        let frame = vec![0x808080u32; 1024];
        let result = RandomDither::new(64, Some(1)).dither_to_indices(&frame, 32, &palette);
        let whites = result.iter().filter(|&&i| i == 5).count();
        assert!(whites > 256 && whites < 768, "got {} whites", whites);
    }

    #[test]
    fn test_seeded_modes_agree() {
        let palette = create_test_palette();
        let frame: Vec<u32> = (0..64u32).map(|i| i * 0x040404).collect();
        let dither = RandomDither::new(50, Some(99));

        let indices = dither.dither_to_indices(&frame, 8, &palette);
        let mut snapped = frame.clone();
        dither.dither(&mut snapped, 8, &palette);

        for (i, &idx) in indices.iter().enumerate() {
            assert_eq!(palette.palette().color(idx as usize).packed(), snapped[i]);
        }
    }
}
