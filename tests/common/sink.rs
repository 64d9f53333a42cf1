//! In-memory map sink.

use mapcast::error::StreamError;
use mapcast::services::{MapSink, MapTile};
use std::sync::{Arc, Mutex};

/// Records every tile and frame boundary it receives.
///
/// Clones share the same record, so a test can keep one clone while the
/// worker owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<Vec<MapTile>>>>,
    pending: Vec<MapTile>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles of every completed frame
    pub fn frames(&self) -> Vec<Vec<MapTile>> {
        self.frames.lock().unwrap().clone()
    }
}

impl MapSink for RecordingSink {
    fn send_tile(&mut self, tile: MapTile) -> Result<(), StreamError> {
        self.pending.push(tile);
        Ok(())
    }

    fn frame_complete(&mut self) -> Result<(), StreamError> {
        let tiles = std::mem::take(&mut self.pending);
        self.frames.lock().unwrap().push(tiles);
        Ok(())
    }
}

/// Fails on the first tile.
#[derive(Debug, Default)]
pub struct FailingSink;

impl MapSink for FailingSink {
    fn send_tile(&mut self, _tile: MapTile) -> Result<(), StreamError> {
        Err(StreamError::Sink("client disconnected".to_string()))
    }
}
