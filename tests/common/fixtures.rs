//! Test fixtures and constants.

use map_dither::{build_palette, ColorPalette, Rgb};
use mapcast::models::{FramePacket, MapGrid, StreamSettings};
use std::time::Duration;

/// Packed colors used across tests
pub mod colors {
    pub const BLACK: u32 = 0x000000;
    pub const WHITE: u32 = 0xFFFFFF;
    pub const RED: u32 = 0xFF0000;
    pub const GREEN: u32 = 0x00FF00;
    pub const BLUE: u32 = 0x0000FF;
    pub const MID_GRAY: u32 = 0x808080;
}

/// Palette of four reserved entries followed by `colors`.
pub fn palette_with(colors: &[u32]) -> ColorPalette {
    let mut all = vec![Rgb::default(); 4];
    all.extend(colors.iter().map(|&c| Rgb::from_packed(c)));
    build_palette(&all).expect("fixture palette is valid")
}

/// Black, white, red, green, blue at indices 4..=8.
pub fn primaries() -> ColorPalette {
    palette_with(&[
        colors::BLACK,
        colors::WHITE,
        colors::RED,
        colors::GREEN,
        colors::BLUE,
    ])
}

/// Frame filled with one color.
pub fn solid_frame(width: usize, height: usize, color: u32) -> FramePacket {
    FramePacket::new(vec![color; width * height], width).expect("fixture frame is valid")
}

/// Horizontal gray ramp from black to white.
pub fn gray_ramp(width: usize, height: usize) -> FramePacket {
    let rgb = (0..width * height)
        .map(|i| {
            let v = ((i % width) * 255 / (width - 1).max(1)) as u32;
            v << 16 | v << 8 | v
        })
        .collect();
    FramePacket::new(rgb, width).expect("fixture frame is valid")
}

/// Stream settings with no frame delay and a generous queue.
pub fn stream_settings(name: &str, grid: MapGrid) -> StreamSettings {
    StreamSettings {
        name: name.to_string(),
        algorithm: map_dither::DitherAlgorithm::FloydSteinberg,
        frame_delay: Duration::ZERO,
        grid,
        queue_depth: 8,
    }
}
