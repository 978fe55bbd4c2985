//! Deterministic PNG encode and decode for card faces.
//!
//! Fixed compression settings ensure byte-identical output for the same
//! pixel data, so a re-rendered deck hashes identically.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType};
use thiserror::Error;

use crate::canvas::Canvas;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("unsupported PNG layout: {0}")]
    UnsupportedLayout(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Fixed value for determinism.
    pub compression: Compression,
    /// Filter type. `NoFilter` for maximum determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a canvas as an RGB PNG file.
pub fn write_rgb(canvas: &Canvas, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_rgb_to_writer(canvas, writer, config)
}

/// Write a canvas as an RGB PNG to any writer.
pub fn write_rgb_to_writer<W: Write>(
    canvas: &Canvas,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, canvas.width, canvas.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&canvas.to_rgb8())?;
    Ok(())
}

/// Write to a Vec<u8> and return the BLAKE3 hash of the bytes.
pub fn write_rgb_to_vec_with_hash(
    canvas: &Canvas,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_rgb_to_writer(canvas, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Read a PNG file back into a canvas. Accepts RGB and RGBA images.
pub fn read_canvas(path: &Path) -> Result<Canvas, PngError> {
    let file = std::fs::File::open(path)?;
    let decoder = Decoder::new(std::io::BufReader::new(file));
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::UnsupportedLayout(format!(
            "bit depth {:?}",
            info.bit_depth
        )));
    }

    let canvas = match info.color_type {
        ColorType::Rgb => Canvas::from_rgb8(info.width, info.height, &buf),
        ColorType::Rgba => Canvas::from_rgba8(info.width, info.height, &buf),
        other => {
            return Err(PngError::UnsupportedLayout(format!(
                "color type {other:?}"
            )))
        }
    };

    canvas.ok_or_else(|| {
        PngError::UnsupportedLayout("pixel data does not match dimensions".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_rgb_deterministic() {
        let mut canvas = Canvas::new(64, 64, Color::black());
        for y in 0..64 {
            for x in 0..64 {
                let r = x as f64 / 63.0;
                let g = y as f64 / 63.0;
                canvas.set(x, y, Color::rgb(r, g, 0.5));
            }
        }

        let config = PngConfig::default();
        let (data1, hash1) = write_rgb_to_vec_with_hash(&canvas, &config).unwrap();
        let (data2, hash2) = write_rgb_to_vec_with_hash(&canvas, &config).unwrap();

        assert_eq!(data1, data2, "PNG data should be identical");
        assert_eq!(hash1, hash2, "PNG hashes should be identical");
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");

        let mut canvas = Canvas::new(16, 16, Color::rgb(0.2, 0.4, 0.6));
        canvas.set(3, 5, Color::white());
        write_rgb(&canvas, &path, &PngConfig::default()).unwrap();

        let back = read_canvas(&path).unwrap();
        assert_eq!(back.width, 16);
        assert_eq!(back.height, 16);
        assert_eq!(back.get(3, 5).to_rgb8(), [255, 255, 255]);
        assert_eq!(back.get(0, 0).to_rgb8(), canvas.get(0, 0).to_rgb8());
    }
}
