pub mod frame_pipeline;
pub mod frame_throttle;
pub mod map_output;
pub mod palette_loader;
pub mod stream_worker;

pub use frame_pipeline::{DitherPipelineStep, FramePipelineStep, SnapPipelineStep};
pub use frame_throttle::FrameThrottle;
pub use map_output::{split_tiles, MapFrameOutput, MapSink, MapTile, TraceSink, TRANSPARENT_INDEX};
pub use palette_loader::load_palette;
pub use stream_worker::{StreamStats, StreamWorker};
