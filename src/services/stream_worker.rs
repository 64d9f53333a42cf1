use std::time::Instant;

use map_dither::ColorPalette;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::StreamError;
use crate::models::{FramePacket, StreamSettings};
use crate::services::{
    DitherPipelineStep, FramePipelineStep, FrameThrottle, MapFrameOutput, MapSink,
};

/// Frame counts for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames dithered and sent to the maps
    pub dithered: u64,
    /// Frames dropped by the frame delay
    pub skipped: u64,
}

/// Dithers one stream's frames on a dedicated blocking thread.
///
/// Error diffusion is sequential, so each stream gets its own worker and
/// streams run in parallel with each other. Frames are throttled on
/// submission; admitted frames wait in a bounded queue, so a slow worker
/// applies backpressure to the frame source.
pub struct StreamWorker {
    name: String,
    throttle: FrameThrottle,
    skipped: u64,
    sender: mpsc::Sender<FramePacket>,
    handle: JoinHandle<Result<u64, StreamError>>,
}

impl StreamWorker {
    /// Start the worker. Must be called from within a tokio runtime.
    pub fn spawn(settings: StreamSettings, palette: ColorPalette, sink: Box<dyn MapSink>) -> Self {
        let (sender, mut receiver) = mpsc::channel::<FramePacket>(settings.queue_depth);
        let name = settings.name.clone();

        tracing::debug!(
            stream = %settings.name,
            algorithm = %settings.algorithm,
            maps = settings.grid.map_count(),
            queue_depth = settings.queue_depth,
            "Starting stream worker"
        );

        let handle = tokio::task::spawn_blocking(move || -> Result<u64, StreamError> {
            let mut step = DitherPipelineStep::new(palette, settings.algorithm);
            let mut output = MapFrameOutput::new(settings.grid, sink);
            let mut dithered = 0u64;

            while let Some(frame) = receiver.blocking_recv() {
                let started = Instant::now();
                let packet = step.process(frame);
                let tiles = output.display(&packet)?;
                dithered += 1;

                tracing::trace!(
                    stream = %settings.name,
                    frame = dithered,
                    tiles,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "Frame displayed"
                );
            }

            Ok(dithered)
        });

        Self {
            throttle: FrameThrottle::new(settings.frame_delay),
            name,
            skipped: 0,
            sender,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a frame, waiting while the queue is full.
    ///
    /// Returns `false` when the frame arrived within the frame delay and
    /// was dropped.
    pub async fn submit(&mut self, frame: FramePacket) -> Result<bool, StreamError> {
        if !self.throttle.admit(Instant::now()) {
            self.skipped += 1;
            tracing::trace!(stream = %self.name, "Frame skipped");
            return Ok(false);
        }

        self.sender
            .send(frame)
            .await
            .map_err(|_| StreamError::Closed(self.name.clone()))?;
        Ok(true)
    }

    /// Close the queue, wait for queued frames, and report the counts.
    pub async fn finish(self) -> Result<StreamStats, StreamError> {
        drop(self.sender);

        let dithered = self
            .handle
            .await
            .map_err(|e| StreamError::Worker(format!("{}: {e}", self.name)))??;

        let stats = StreamStats {
            dithered,
            skipped: self.skipped,
        };
        tracing::debug!(
            stream = %self.name,
            dithered = stats.dithered,
            skipped = stats.skipped,
            "Stream worker stopped"
        );
        Ok(stats)
    }
}

impl std::fmt::Debug for StreamWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamWorker")
            .field("name", &self.name)
            .field("throttle", &self.throttle)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}
