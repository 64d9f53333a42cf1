pub mod config;
pub mod frame;
pub mod grid;

pub use config::{AppConfig, PaletteConfig, PaletteKind, StreamConfig, StreamSettings};
pub use frame::{DitheredFramePacket, FramePacket};
pub use grid::{MapGrid, MAP_SIZE};
