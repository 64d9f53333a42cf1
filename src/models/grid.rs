/// Side length of one Minecraft map, in pixels.
pub const MAP_SIZE: usize = 128;

/// A rectangular wall of maps showing one stream.
///
/// Maps are numbered row-major from `starting_map`: the map in grid row
/// `row`, column `col` has id `starting_map + row * maps_wide + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapGrid {
    pub maps_wide: u32,
    pub maps_high: u32,
    pub starting_map: u32,
}

impl MapGrid {
    pub fn new(maps_wide: u32, maps_high: u32, starting_map: u32) -> Self {
        Self {
            maps_wide,
            maps_high,
            starting_map,
        }
    }

    pub fn map_count(&self) -> u32 {
        self.maps_wide * self.maps_high
    }

    /// Id of the bottom-right map, or `None` if the ids do not fit in `u32`.
    ///
    /// Every other id in the grid is smaller, so a `Some` here means
    /// [`map_id`](Self::map_id) and [`map_count`](Self::map_count) cannot
    /// overflow.
    pub fn last_map_id(&self) -> Option<u32> {
        self.maps_wide
            .checked_mul(self.maps_high)?
            .checked_sub(1)?
            .checked_add(self.starting_map)
    }

    /// Id of the map at grid position `(col, row)`.
    pub fn map_id(&self, col: u32, row: u32) -> u32 {
        self.starting_map + row * self.maps_wide + col
    }

    /// Pixel size of the whole wall.
    pub fn pixel_size(&self) -> (usize, usize) {
        (
            self.maps_wide as usize * MAP_SIZE,
            self.maps_high as usize * MAP_SIZE,
        )
    }
}

impl Default for MapGrid {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}
