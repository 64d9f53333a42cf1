use crate::error::StreamError;
use crate::models::{DitheredFramePacket, MapGrid, MAP_SIZE};

/// Palette index written where the frame does not cover a map.
pub const TRANSPARENT_INDEX: u8 = 0;

/// The pixels of one map, ready to send to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTile {
    pub map_id: u32,
    /// `MAP_SIZE * MAP_SIZE` palette indices, row-major
    pub pixels: Vec<u8>,
}

impl MapTile {
    /// Pixels that show something (not transparent).
    pub fn covered_pixels(&self) -> usize {
        self.pixels
            .iter()
            .filter(|&&i| i != TRANSPARENT_INDEX)
            .count()
    }
}

/// Receives the tiles of every displayed frame.
pub trait MapSink: Send {
    fn send_tile(&mut self, tile: MapTile) -> Result<(), StreamError>;

    /// Called once all tiles of a frame were sent.
    fn frame_complete(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}

/// Sink that only logs what it receives.
#[derive(Debug, Default)]
pub struct TraceSink;

impl MapSink for TraceSink {
    fn send_tile(&mut self, tile: MapTile) -> Result<(), StreamError> {
        tracing::trace!(
            map_id = tile.map_id,
            covered = tile.covered_pixels(),
            "Map tile"
        );
        Ok(())
    }
}

/// Cuts dithered frames into map tiles and hands them to a sink.
///
/// The frame is anchored at the top-left map. Frame pixels past the grid
/// are dropped; map pixels past the frame are transparent.
pub struct MapFrameOutput {
    grid: MapGrid,
    sink: Box<dyn MapSink>,
}

impl MapFrameOutput {
    pub fn new(grid: MapGrid, sink: Box<dyn MapSink>) -> Self {
        Self { grid, sink }
    }

    /// Send every tile of `frame`, returning how many were sent.
    pub fn display(&mut self, frame: &DitheredFramePacket) -> Result<usize, StreamError> {
        let tiles = split_tiles(self.grid, frame);
        let count = tiles.len();
        for tile in tiles {
            self.sink.send_tile(tile)?;
        }
        self.sink.frame_complete()?;
        Ok(count)
    }
}

impl std::fmt::Debug for MapFrameOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapFrameOutput")
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

/// One tile per map in `grid`, in map id order.
pub fn split_tiles(grid: MapGrid, frame: &DitheredFramePacket) -> Vec<MapTile> {
    let mut tiles = Vec::with_capacity(grid.map_count() as usize);

    for row in 0..grid.maps_high {
        for col in 0..grid.maps_wide {
            let x0 = col as usize * MAP_SIZE;
            let y0 = row as usize * MAP_SIZE;
            let mut pixels = vec![TRANSPARENT_INDEX; MAP_SIZE * MAP_SIZE];

            // Clip the copy to the part of the frame this map covers
            let copy_w = frame.width().saturating_sub(x0).min(MAP_SIZE);
            let copy_h = frame.height().saturating_sub(y0).min(MAP_SIZE);
            if copy_w > 0 {
                for dy in 0..copy_h {
                    let src = (y0 + dy) * frame.width() + x0;
                    pixels[dy * MAP_SIZE..dy * MAP_SIZE + copy_w]
                        .copy_from_slice(&frame.indices()[src..src + copy_w]);
                }
            }

            tiles.push(MapTile {
                map_id: grid.map_id(col, row),
                pixels,
            });
        }
    }

    tiles
}
