use map_dither::{ColorPalette, DitherAlgorithm, MapDitherer};

use crate::models::{DitheredFramePacket, FramePacket};

/// One stage a frame passes through on its way to the maps.
///
/// Steps take `&mut self` because they keep per-stream scratch; run one
/// instance per stream.
pub trait FramePipelineStep {
    type Output;

    fn process(&mut self, frame: FramePacket) -> Self::Output;
}

/// Reduces frames to palette indices for map output.
#[derive(Debug)]
pub struct DitherPipelineStep {
    ditherer: MapDitherer,
}

impl DitherPipelineStep {
    pub fn new(palette: ColorPalette, algorithm: DitherAlgorithm) -> Self {
        Self {
            ditherer: MapDitherer::new(palette).algorithm(algorithm),
        }
    }

    /// Fix the random dither seed (reproducible output).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ditherer = self.ditherer.seed(seed);
        self
    }

    pub fn algorithm(&self) -> DitherAlgorithm {
        self.ditherer.selected_algorithm()
    }
}

impl FramePipelineStep for DitherPipelineStep {
    type Output = DitheredFramePacket;

    fn process(&mut self, frame: FramePacket) -> DitheredFramePacket {
        self.ditherer
            .dither_frame(frame.rgb(), frame.width())
            .into()
    }
}

/// Snaps frames to palette colors in place, for previews.
#[derive(Debug)]
pub struct SnapPipelineStep {
    ditherer: MapDitherer,
}

impl SnapPipelineStep {
    pub fn new(palette: ColorPalette, algorithm: DitherAlgorithm) -> Self {
        Self {
            ditherer: MapDitherer::new(palette).algorithm(algorithm),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ditherer = self.ditherer.seed(seed);
        self
    }
}

impl FramePipelineStep for SnapPipelineStep {
    type Output = FramePacket;

    fn process(&mut self, mut frame: FramePacket) -> FramePacket {
        let width = frame.width();
        self.ditherer.dither_in_place(frame.rgb_mut(), width);
        frame
    }
}
