//! Frame pipeline tests: frames in, palette indices or snapped colors out.

mod common;

use common::*;
use map_dither::{BayerSize, DitherAlgorithm};
use mapcast::error::FrameError;
use mapcast::models::FramePacket;
use mapcast::services::{DitherPipelineStep, FramePipelineStep, SnapPipelineStep};
use pretty_assertions::assert_eq;

const ALGORITHMS: [DitherAlgorithm; 5] = [
    DitherAlgorithm::FloydSteinberg,
    DitherAlgorithm::FilterLite,
    DitherAlgorithm::StevensonArce,
    DitherAlgorithm::Ordered(BayerSize::Eight),
    DitherAlgorithm::Random { weight: 24 },
];

#[test]
fn test_every_algorithm_yields_selectable_indices() {
    let palette = primaries();
    for algorithm in ALGORITHMS {
        let mut step = DitherPipelineStep::new(palette.clone(), algorithm);
        let packet = step.process(gray_ramp(32, 8));

        assert_eq!(packet.width(), 32);
        assert_eq!(packet.height(), 8);
        assert_selectable(packet.indices(), &palette);
    }
}

#[test]
fn test_snap_step_emits_palette_colors() {
    let palette = primaries();
    for algorithm in ALGORITHMS {
        let mut step = SnapPipelineStep::new(palette.clone(), algorithm);
        let frame = step.process(gray_ramp(32, 8));
        assert_palette_colors(frame.rgb(), &palette);
    }
}

#[test]
fn test_exact_colors_pass_through() {
    let palette = primaries();
    let rgb = vec![
        colors::RED,
        colors::GREEN,
        colors::BLUE,
        colors::WHITE,
        colors::BLACK,
        colors::RED,
    ];

    for algorithm in [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::FilterLite,
        DitherAlgorithm::StevensonArce,
    ] {
        let mut step = DitherPipelineStep::new(palette.clone(), algorithm);
        let packet = step.process(FramePacket::new(rgb.clone(), 3).unwrap());
        assert_eq!(packet.indices(), &[6, 7, 8, 5, 4, 6], "{}", algorithm);
    }
}

#[test]
fn test_step_reuse_across_frame_sizes() {
    let palette = primaries();
    let mut step = DitherPipelineStep::new(palette.clone(), DitherAlgorithm::StevensonArce);

    let first = step.process(gray_ramp(16, 4));
    step.process(gray_ramp(40, 3));
    let again = step.process(gray_ramp(16, 4));

    assert_eq!(first, again);
}

#[test]
fn test_invalid_frames_rejected_before_dithering() {
    assert_eq!(FramePacket::new(vec![0; 7], 2), Err(FrameError::Ragged { len: 7, width: 2 }));
    assert_eq!(FramePacket::new(vec![0; 4], 0), Err(FrameError::ZeroWidth));
    assert_eq!(FramePacket::new(vec![], 3), Err(FrameError::Empty));
}

#[test]
fn test_mid_gray_dithers_to_a_mix() {
    let palette = palette_with(&[colors::BLACK, colors::WHITE]);
    let mut step = DitherPipelineStep::new(palette, DitherAlgorithm::FloydSteinberg);
    let packet = step.process(solid_frame(16, 16, colors::MID_GRAY));

    let white = packet.indices().iter().filter(|&&i| i == 5).count();
    // roughly half of 256 pixels
    assert!((96..=160).contains(&white), "{} white pixels", white);
}
