//! Palette types and nearest-color lookup
//!
//! - [`Palette`]: validated, ordered color list (indices 0-3 reserved)
//! - [`MinecraftMapPalette`]: the built-in shaded map color table
//! - [`ColorPalette`]: a palette plus its precomputed lookup tables, cheap to clone

mod color_palette;
mod error;
mod lookup;
mod minecraft;
mod palette;

pub use color_palette::ColorPalette;
pub use error::{PaletteError, ParseColorError};
pub use lookup::{key, nearest_index, weighted_distance, LookupTable, TABLE_SIZE};
pub use minecraft::{MinecraftMapPalette, BASE_COLORS, SHADE_MULTIPLIERS};
pub use palette::{Palette, MAX_COLORS, MIN_COLORS, RESERVED_ENTRIES};
