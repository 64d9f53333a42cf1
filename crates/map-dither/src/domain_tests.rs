//! Domain-critical regression tests for map-dither.
//!
//! These tests pin down properties every algorithm must keep, not just
//! happy paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::api::MapDitherer;
    use crate::color::Rgb;
    use crate::dither::{
        BayerSize, Dither, DitherAlgorithm, FilterLite, FloydSteinberg, StevensonArce,
        FILTER_LITE, FLOYD_STEINBERG, STEVENSON_ARCE,
    };
    use crate::palette::{nearest_index, ColorPalette, MinecraftMapPalette, Palette, TABLE_SIZE};
    use pretty_assertions::assert_eq;

    const ALL_ALGORITHMS: [DitherAlgorithm; 7] = [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::FilterLite,
        DitherAlgorithm::StevensonArce,
        DitherAlgorithm::Ordered(BayerSize::Two),
        DitherAlgorithm::Ordered(BayerSize::Four),
        DitherAlgorithm::Ordered(BayerSize::Eight),
        DitherAlgorithm::Random { weight: 24 },
    ];

    fn with_reserved(colors: &[Rgb]) -> ColorPalette {
        let mut all = vec![Rgb::default(); 4];
        all.extend_from_slice(colors);
        ColorPalette::build(Palette::new(&all).unwrap())
    }

    fn black_white() -> ColorPalette {
        with_reserved(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)])
    }

    fn grays() -> ColorPalette {
        with_reserved(&[
            Rgb::new(0, 0, 0),
            Rgb::new(64, 64, 64),
            Rgb::new(128, 128, 128),
            Rgb::new(192, 192, 192),
            Rgb::new(255, 255, 255),
        ])
    }

    fn primaries() -> ColorPalette {
        with_reserved(&[
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 255),
            Rgb::new(128, 128, 128),
        ])
    }

    /// A busy 12x9 frame touching every channel range.
    fn test_frame() -> Vec<u32> {
        (0..108u32)
            .map(|i| {
                let r = (i * 37) % 256;
                let g = (i * 91 + 40) % 256;
                let b = (255 - (i * 13) % 256) % 256;
                r << 16 | g << 8 | b
            })
            .collect()
    }

    // ========================================================================
    // Lookup tables
    // ========================================================================

    /// If this breaks, it means: the color table and the index table were
    /// built from different searches, so in-place and indexed output would
    /// disagree for some colors.
    #[test]
    fn test_tables_agree_for_every_key() {
        let palette = primaries();
        let colors = palette.palette();
        let index_table = palette.color_map();
        let color_table = palette.full_color_map();

        assert_eq!(index_table.len(), TABLE_SIZE);
        assert_eq!(color_table.len(), TABLE_SIZE);
        for k in 0..TABLE_SIZE {
            let idx = index_table[k] as usize;
            assert!(
                (4..colors.len()).contains(&idx),
                "REGRESSION: key {} resolved to index {}",
                k,
                idx
            );
            assert_eq!(colors.color(idx).packed(), color_table[k], "key {}", k);
        }
    }

    /// If this breaks, it means: table construction skipped or reordered
    /// slabs, so a key no longer holds the answer for its own color.
    #[test]
    fn test_table_entries_match_direct_search() {
        let palette = primaries();
        for r in (0..=254u8).step_by(34) {
            for g in (0..=254u8).step_by(22) {
                for b in (0..=254u8).step_by(46) {
                    assert_eq!(
                        palette.best_index(r, g, b),
                        nearest_index(palette.palette(), Rgb::new(r, g, b)),
                        "({}, {}, {})",
                        r,
                        g,
                        b
                    );
                }
            }
        }
    }

    /// If this breaks, it means: the Minecraft palette order or shading
    /// changed, so map bytes would render as the wrong colors in game.
    #[test]
    fn test_minecraft_exact_colors() {
        let palette = MinecraftMapPalette::palette();
        // base * 4 + 2 is the unshaded (x255) entry
        assert_eq!(nearest_index(&palette, Rgb::new(0x00, 0x7C, 0x00)), 7 * 4 + 2);
        assert_eq!(nearest_index(&palette, Rgb::new(0xFF, 0x00, 0x00)), 4 * 4 + 2);
        assert_eq!(nearest_index(&palette, Rgb::new(0xFF, 0xFF, 0xFF)), 8 * 4 + 2);
        assert_eq!(nearest_index(&palette, Rgb::new(0x40, 0x40, 0xFF)), 12 * 4 + 2);
        // black is never a reserved index
        assert!(nearest_index(&palette, Rgb::new(0, 0, 0)) >= 4);
    }

    // ========================================================================
    // Output validity
    // ========================================================================

    /// If this breaks, it means: an algorithm produced an index outside the
    /// palette or one of the reserved transparent slots.
    #[test]
    fn test_all_algorithms_produce_selectable_indices() {
        let palette = primaries();
        let frame = test_frame();
        for algorithm in ALL_ALGORITHMS {
            let indices = crate::dither_to_indices(algorithm, &palette, &frame, 12);
            assert_eq!(indices.len(), frame.len());
            assert!(
                indices.iter().all(|&i| (4..palette.len() as u8).contains(&i)),
                "REGRESSION: {} produced an out-of-range index",
                algorithm
            );
        }
    }

    /// If this breaks, it means: the two output modes diverged, e.g. one of
    /// them looks up the unclamped color.
    #[test]
    fn test_in_place_and_indexed_agree() {
        let palette = primaries();
        let frame = test_frame();
        for algorithm in ALL_ALGORITHMS {
            let mut ditherer = MapDitherer::new(palette.clone())
                .algorithm(algorithm)
                .seed(42);
            let indices = ditherer.dither_to_indices(&frame, 12);
            let mut snapped = frame.clone();
            ditherer.dither_in_place(&mut snapped, 12);

            for (i, (&idx, &color)) in indices.iter().zip(&snapped).enumerate() {
                assert_eq!(
                    palette.palette().color(idx as usize).packed(),
                    color,
                    "{} pixel {}",
                    algorithm,
                    i
                );
            }
        }
    }

    /// If this breaks, it means: error diffusion depends on something other
    /// than its input (uninitialized scratch, shared state).
    #[test]
    fn test_floyd_steinberg_deterministic() {
        let palette = primaries();
        let mut a = test_frame();
        let mut b = test_frame();
        FloydSteinberg.dither(&mut a, 12, &palette);
        FloydSteinberg.dither(&mut b, 12, &palette);
        assert_eq!(a, b);
    }

    // ========================================================================
    // Kernels
    // ========================================================================

    /// If this breaks, it means: a kernel tap was dropped or mistyped and the
    /// algorithm no longer conserves error.
    #[test]
    fn test_kernel_weights_sum_to_one() {
        assert_eq!(FLOYD_STEINBERG.total_weight(), (1, 1));
        assert_eq!(FILTER_LITE.total_weight(), (1, 1));
        assert_eq!(STEVENSON_ARCE.total_weight(), (1, 1));
    }

    /// If this breaks, it means: an exact-palette image picked up error from
    /// somewhere, so flat UI colors would start to speckle.
    #[test]
    fn test_checkerboard_unchanged() {
        let palette = black_white();
        let board = [0x000000u32, 0xFFFFFF, 0xFFFFFF, 0x000000];
        for algorithm in ALL_ALGORITHMS {
            let algorithm = algorithm.with_random_weight(0);
            let mut frame = board;
            crate::dither(algorithm, &palette, &mut frame, 2);
            assert_eq!(frame, board, "{}", algorithm);
        }
    }

    /// If this breaks, it means: right-to-left rows are not the mirror image
    /// of left-to-right rows (kernel not flipped, or scan order wrong).
    ///
    /// Row 0 is made of exact palette colors, so it passes no error down and
    /// row 1 starts from a clean slate just like a single-row frame.
    #[test]
    fn test_serpentine_rows_mirror() {
        let palette = primaries();
        let row0 = [0x000000u32, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0x808080, 0xFFFFFF];
        let row1 = [0x3A7F20u32, 0xC05060, 0x101010, 0x99AACC, 0x7F7F7F, 0xE0E0E0, 0x2040F0];
        let width = row0.len();

        let kernels: [&dyn Dither; 3] = [&FloydSteinberg, &FilterLite, &StevensonArce];
        for dither in kernels {
            let frame: Vec<u32> = row0.iter().chain(row1.iter()).copied().collect();
            let two_rows = dither.dither_to_indices(&frame, width, &palette);
            assert_eq!(
                &two_rows[..width],
                &dither.dither_to_indices(&row0, width, &palette)[..]
            );

            let mut reversed = row1;
            reversed.reverse();
            let mut single = dither.dither_to_indices(&reversed, width, &palette);
            single.reverse();
            assert_eq!(&two_rows[width..], &single[..]);
        }
    }

    // ========================================================================
    // Ordered dithering
    // ========================================================================

    /// If this breaks, it means: the Bayer offsets grew beyond half the
    /// palette spacing (or the sign flipped), so already-snapped frames
    /// change when dithered again.
    #[test]
    fn test_ordered_resnap_is_idempotent() {
        let palette = grays();
        for size in [BayerSize::Two, BayerSize::Four, BayerSize::Eight] {
            let algorithm = DitherAlgorithm::Ordered(size);
            let mut once = test_frame();
            crate::dither(algorithm, &palette, &mut once, 12);
            let mut twice = once.clone();
            crate::dither(algorithm, &palette, &mut twice, 12);
            assert_eq!(once, twice, "{}", algorithm);
        }
    }
}
