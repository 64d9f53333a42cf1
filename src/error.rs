use map_dither::{DitherError, ParseAlgorithmError};
use thiserror::Error;

/// A frame rejected at the boundary, before it reaches the ditherer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame width must be greater than zero")]
    ZeroWidth,

    #[error("Frame is empty")]
    Empty,

    #[error("Frame length {len} is not a multiple of width {width}")]
    Ragged { len: usize, width: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown stream: {0}")]
    UnknownStream(String),

    #[error("Stream {stream}: {source}")]
    Algorithm {
        stream: String,
        #[source]
        source: ParseAlgorithmError,
    },

    #[error("Stream {stream}: map grid {maps_wide}x{maps_high} has no maps")]
    EmptyGrid {
        stream: String,
        maps_wide: u32,
        maps_high: u32,
    },

    #[error("Stream {stream}: map ids from {starting_map} over a {maps_wide}x{maps_high} grid overflow u32")]
    MapIdOverflow {
        stream: String,
        starting_map: u32,
        maps_wide: u32,
        maps_high: u32,
    },

    #[error("Invalid palette: {0}")]
    Palette(#[from] DitherError),
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedLayout(String),

    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Stream {0} is closed")]
    Closed(String),

    #[error("Stream worker failed: {0}")]
    Worker(String),

    #[error("Map sink error: {0}")]
    Sink(String),
}
