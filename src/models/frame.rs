use crate::error::FrameError;
use map_dither::DitheredFrame;

/// A truecolor frame as it arrives from a frame source.
///
/// Pixels are packed `0xRRGGBB` in row-major order; the top byte is
/// ignored. Construction validates the geometry so nothing downstream can
/// hit the ditherer's precondition panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePacket {
    rgb: Vec<u32>,
    width: usize,
    height: usize,
}

impl FramePacket {
    pub fn new(rgb: Vec<u32>, width: usize) -> Result<Self, FrameError> {
        if width == 0 {
            return Err(FrameError::ZeroWidth);
        }
        if rgb.is_empty() {
            return Err(FrameError::Empty);
        }
        if rgb.len() % width != 0 {
            return Err(FrameError::Ragged {
                len: rgb.len(),
                width,
            });
        }

        let height = rgb.len() / width;
        Ok(Self { rgb, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rgb(&self) -> &[u32] {
        &self.rgb
    }

    /// Mutable pixels; the geometry stays fixed.
    pub fn rgb_mut(&mut self) -> &mut [u32] {
        &mut self.rgb
    }

    pub fn into_rgb(self) -> Vec<u32> {
        self.rgb
    }
}

/// A frame reduced to map palette indices, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitheredFramePacket {
    indices: Vec<u8>,
    width: usize,
    height: usize,
}

impl DitheredFramePacket {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Palette index at `(x, y)`, or `None` outside the frame.
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.indices[y * self.width + x])
    }
}

impl From<DitheredFrame> for DitheredFramePacket {
    fn from(frame: DitheredFrame) -> Self {
        let width = frame.width();
        let height = frame.height();
        Self {
            indices: frame.into_indices(),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_packet_geometry() {
        let frame = FramePacket::new(vec![0; 12], 4).unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.rgb().len(), 12);
    }

    #[test]
    fn test_frame_packet_rejects_zero_width() {
        assert_eq!(FramePacket::new(vec![0; 4], 0), Err(FrameError::ZeroWidth));
    }

    #[test]
    fn test_frame_packet_rejects_empty() {
        assert_eq!(FramePacket::new(Vec::new(), 4), Err(FrameError::Empty));
    }

    #[test]
    fn test_frame_packet_rejects_ragged() {
        assert_eq!(
            FramePacket::new(vec![0; 10], 3),
            Err(FrameError::Ragged { len: 10, width: 3 })
        );
    }

    #[test]
    fn test_index_at_bounds() {
        let packet = DitheredFramePacket {
            indices: vec![4, 5, 6, 7, 8, 9],
            width: 3,
            height: 2,
        };
        assert_eq!(packet.index_at(0, 0), Some(4));
        assert_eq!(packet.index_at(2, 1), Some(9));
        assert_eq!(packet.index_at(3, 0), None);
        assert_eq!(packet.index_at(0, 2), None);
    }
}
