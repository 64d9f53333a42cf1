//! PNG previews of what a stream will look like on the maps.
//!
//! The image is decoded to a packed RGB frame, snapped to the palette in
//! place and encoded again as 8-bit RGB.

use std::io::Cursor;

use map_dither::{ColorPalette, DitherAlgorithm};

use crate::error::PreviewError;
use crate::models::FramePacket;
use crate::services::{FramePipelineStep, SnapPipelineStep};

/// Decode a PNG into a packed `0xRRGGBB` frame. Alpha is discarded.
pub fn decode_png(bytes: &[u8]) -> Result<FramePacket, PreviewError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    // Palette and low bit depth images come out as 8-bit samples
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| PreviewError::PngDecode(e.to_string()))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| PreviewError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(PreviewError::UnsupportedLayout(format!(
                "{:?} at {:?}",
                info.color_type, info.bit_depth
            )))
        }
    };

    let rgb: Vec<u32> = data
        .chunks_exact(channels)
        .map(|px| {
            let (r, g, b) = if channels < 3 {
                (px[0], px[0], px[0])
            } else {
                (px[0], px[1], px[2])
            };
            (r as u32) << 16 | (g as u32) << 8 | b as u32
        })
        .collect();

    Ok(FramePacket::new(rgb, info.width as usize)?)
}

/// Encode a frame as an 8-bit RGB PNG.
pub fn encode_png(frame: &FramePacket) -> Result<Vec<u8>, PreviewError> {
    let data: Vec<u8> = frame
        .rgb()
        .iter()
        .flat_map(|&px| [(px >> 16) as u8, (px >> 8) as u8, px as u8])
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder =
            png::Encoder::new(&mut buf, frame.width() as u32, frame.height() as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Dither a PNG with `algorithm` and return the preview PNG.
pub fn render_preview(
    png_bytes: &[u8],
    palette: &ColorPalette,
    algorithm: DitherAlgorithm,
) -> Result<Vec<u8>, PreviewError> {
    let frame = decode_png(png_bytes)?;
    tracing::debug!(
        width = frame.width(),
        height = frame.height(),
        %algorithm,
        "Rendering preview"
    );

    let mut step = SnapPipelineStep::new(palette.clone(), algorithm);
    encode_png(&step.process(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_dither::{build_palette, Rgb};
    use pretty_assertions::assert_eq;

    fn gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&vec![value; (width * height) as usize])
                .unwrap();
        }
        buf
    }

    #[test]
    fn test_encode_then_decode_keeps_pixels() {
        let frame = FramePacket::new(vec![0x102030, 0xA0B0C0, 0xFFFFFF, 0x000000], 2).unwrap();
        let decoded = decode_png(&encode_png(&frame).unwrap()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_decode_grayscale() {
        let frame = decode_png(&gray_png(3, 2, 0x40)).unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert!(frame.rgb().iter().all(|&px| px == 0x404040));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_png(b"not a png"),
            Err(PreviewError::PngDecode(_))
        ));
    }

    #[test]
    fn test_render_preview_uses_palette_colors() {
        let mut colors = vec![Rgb::default(); 4];
        colors.extend([Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
        let palette = build_palette(&colors).unwrap();

        let preview =
            render_preview(&gray_png(8, 8, 0x80), &palette, DitherAlgorithm::FloydSteinberg)
                .unwrap();
        let frame = decode_png(&preview).unwrap();

        assert_eq!(frame.width(), 8);
        assert!(frame
            .rgb()
            .iter()
            .all(|&px| px == 0x000000 || px == 0xFFFFFF));
        // mid gray dithers to a mix, not a flat field
        assert!(frame.rgb().contains(&0x000000));
        assert!(frame.rgb().contains(&0xFFFFFF));
    }
}
