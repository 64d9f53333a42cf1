use std::time::Instant;

use map_dither::{build_palette, ColorPalette, DitherError};

use crate::error::ConfigError;
use crate::models::AppConfig;

/// Build the configured palette and its lookup tables.
///
/// This is the expensive startup step (two 2M-entry tables); the result is
/// cheap to clone and shared by every stream.
pub fn load_palette(config: &AppConfig) -> Result<ColorPalette, ConfigError> {
    let colors = config.palette_colors()?;

    let started = Instant::now();
    let palette = build_palette(&colors).map_err(DitherError::from)?;

    tracing::info!(
        kind = ?config.palette.kind,
        colors = palette.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Built palette lookup tables"
    );

    Ok(palette)
}
