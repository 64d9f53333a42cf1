use crate::error::ConfigError;
use crate::models::MapGrid;
use map_dither::{DitherAlgorithm, DitherError, MinecraftMapPalette, Rgb};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Colors the maps can show
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Stream definitions, keyed by stream name
    #[serde(default)]
    pub streams: HashMap<String, StreamConfig>,
}

/// Which palette to build lookup tables for
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    /// The 248 shaded Minecraft map colors
    #[default]
    Minecraft,
    /// Hex colors listed in `colors`
    Custom,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaletteConfig {
    #[serde(default)]
    pub kind: PaletteKind,

    /// `#RRGGBB` entries for custom palettes; the first four are reserved
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Configuration for one stream
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Dither algorithm name (e.g. "floyd-steinberg", "ordered-4")
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Noise amplitude when `algorithm` is "random"
    #[serde(default)]
    pub random_weight: Option<u8>,

    /// Minimum time between displayed frames
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,

    #[serde(default = "default_maps")]
    pub maps_wide: u32,

    #[serde(default = "default_maps")]
    pub maps_high: u32,

    /// Id of the top-left map
    #[serde(default)]
    pub starting_map: u32,

    /// Frames buffered ahead of the worker
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

fn default_algorithm() -> String {
    "floyd-steinberg".to_string()
}

fn default_frame_delay_ms() -> u64 {
    50 // 20 fps
}

fn default_maps() -> u32 {
    1
}

fn default_queue_depth() -> usize {
    4
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            random_weight: None,
            frame_delay_ms: default_frame_delay_ms(),
            maps_wide: default_maps(),
            maps_high: default_maps(),
            starting_map: 0,
            queue_depth: default_queue_depth(),
        }
    }
}

/// A stream configuration with every field checked and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSettings {
    pub name: String,
    pub algorithm: DitherAlgorithm,
    pub frame_delay: Duration,
    pub grid: MapGrid,
    pub queue_depth: usize,
}

impl StreamConfig {
    /// Parse the algorithm name and check the map grid.
    pub fn resolve(&self, name: &str) -> Result<StreamSettings, ConfigError> {
        let mut algorithm: DitherAlgorithm =
            self.algorithm
                .parse()
                .map_err(|source| ConfigError::Algorithm {
                    stream: name.to_string(),
                    source,
                })?;
        if let Some(weight) = self.random_weight {
            algorithm = algorithm.with_random_weight(weight);
        }

        if self.maps_wide == 0 || self.maps_high == 0 {
            return Err(ConfigError::EmptyGrid {
                stream: name.to_string(),
                maps_wide: self.maps_wide,
                maps_high: self.maps_high,
            });
        }

        let grid = MapGrid::new(self.maps_wide, self.maps_high, self.starting_map);
        if grid.last_map_id().is_none() {
            return Err(ConfigError::MapIdOverflow {
                stream: name.to_string(),
                starting_map: self.starting_map,
                maps_wide: self.maps_wide,
                maps_high: self.maps_high,
            });
        }

        Ok(StreamSettings {
            name: name.to_string(),
            algorithm,
            frame_delay: Duration::from_millis(self.frame_delay_ms),
            grid,
            queue_depth: self.queue_depth.max(1),
        })
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        streams = config.streams.len(),
                        palette = ?config.palette.kind,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolved settings for a named stream
    pub fn stream_settings(&self, name: &str) -> Result<StreamSettings, ConfigError> {
        self.streams
            .get(name)
            .ok_or_else(|| ConfigError::UnknownStream(name.to_string()))?
            .resolve(name)
    }

    /// Stream names in sorted order
    pub fn stream_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.streams.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The configured palette colors, reserved entries included
    pub fn palette_colors(&self) -> Result<Vec<Rgb>, ConfigError> {
        match self.palette.kind {
            PaletteKind::Minecraft => Ok(MinecraftMapPalette::colors()),
            PaletteKind::Custom => self
                .palette
                .colors
                .iter()
                .map(|hex| hex.parse::<Rgb>().map_err(DitherError::from))
                .collect::<Result<Vec<_>, _>>()
                .map_err(ConfigError::from),
        }
    }
}
