//! Assertion helpers for tests.

use map_dither::ColorPalette;
use mapcast::services::MapTile;
use pretty_assertions::assert_eq;

/// Assert every index is a selectable (non-reserved) palette entry
pub fn assert_selectable(indices: &[u8], palette: &ColorPalette) {
    for (i, &idx) in indices.iter().enumerate() {
        assert!(
            (4..palette.len()).contains(&(idx as usize)),
            "Pixel {} has index {}, expected 4..{}",
            i,
            idx,
            palette.len()
        );
    }
}

/// Assert every pixel is one of the palette's colors
pub fn assert_palette_colors(rgb: &[u32], palette: &ColorPalette) {
    let colors: Vec<u32> = palette.palette().colors().iter().map(|c| c.packed()).collect();
    for (i, px) in rgb.iter().enumerate() {
        assert!(
            colors.contains(px),
            "Pixel {} is #{:06X}, not a palette color",
            i,
            px
        );
    }
}

/// Assert tiles carry the expected map ids, in order
pub fn assert_map_ids(tiles: &[MapTile], expected: &[u32]) {
    let ids: Vec<u32> = tiles.iter().map(|t| t.map_id).collect();
    assert_eq!(ids, expected, "Unexpected map ids");
}
