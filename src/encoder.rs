// Copyright 2025 Dustin McAfee
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Minimal PNG encoder for 8-bit RGBA images.
//!
//! # Encoding Process
//!
//! 1. The 8-byte PNG signature is written.
//! 2. An IHDR chunk describes the image: 8-bit depth, color type 6 (RGBA),
//!    no interlacing.
//! 3. Every row is prefixed with filter type 0 (None) and the rows are
//!    concatenated.
//! 4. The scanlines are compressed with zlib at `Compression::best()` and
//!    emitted as a single IDAT chunk.
//! 5. An empty IEND chunk terminates the stream.
//!
//! The output is deterministic for a given input and zlib backend.

use bytes::{BufMut, BytesMut};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::Path;

use crate::chunk::{Chunk, IDAT, IEND, IHDR, PNG_SIGNATURE};
use crate::error::{Result, TextureError};

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Largest width or height the PNG format allows (2^31 - 1).
pub const MAX_DIMENSION: u32 = 0x7FFF_FFFF;

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;

/// IHDR payload for an 8-bit RGBA, non-interlaced image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ihdr {
    pub width: u32,
    pub height: u32,
}

impl Ihdr {
    /// Serializes the 13-byte IHDR payload.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = BIT_DEPTH;
        out[9] = COLOR_TYPE_RGBA;
        out[10] = 0; // compression method
        out[11] = 0; // filter method
        out[12] = 0; // interlace method
        out
    }

    fn into_chunk(self) -> Chunk {
        Chunk::new(IHDR, self.to_bytes().to_vec())
    }
}

/// Checks that `pixels` holds exactly `width * height` RGBA pixels.
///
/// # Errors
///
/// Returns `TextureError::Validation` if a dimension is zero or above
/// [`MAX_DIMENSION`], or if the buffer length does not match.
pub fn validate_buffer(width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TextureError::Validation(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(TextureError::Validation(format!(
            "image dimensions {width}x{height} exceed the PNG limit of {MAX_DIMENSION}"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| {
            TextureError::Validation(format!("image {width}x{height} is too large to address"))
        })?;
    if pixels.len() != expected {
        return Err(TextureError::Validation(format!(
            "input buffer size mismatch: got {} bytes, expected {} bytes for {}x{} image ({} bytes per pixel)",
            pixels.len(),
            expected,
            width,
            height,
            BYTES_PER_PIXEL
        )));
    }
    Ok(())
}

/// Prefixes every row with filter type None.
fn build_scanlines(width: u32, pixels: &[u8]) -> Vec<u8> {
    let stride = width as usize * BYTES_PER_PIXEL;
    let rows = pixels.len() / stride;
    let mut raw = Vec::with_capacity(pixels.len() + rows);
    for row in pixels.chunks_exact(stride) {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

fn compress_scanlines(raw: &[u8]) -> Result<Vec<u8>> {
    let mut zlib_encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    zlib_encoder.write_all(raw)?;
    let compressed = zlib_encoder.finish()?;

    #[cfg(feature = "debug-logging")]
    log::info!(
        "compress_scanlines: {} bytes compressed to {}",
        raw.len(),
        compressed.len()
    );

    if u32::try_from(compressed.len()).is_err() {
        return Err(TextureError::Validation(format!(
            "compressed image data is {} bytes, larger than a single chunk allows",
            compressed.len()
        )));
    }
    Ok(compressed)
}

/// Encodes an RGBA buffer as a complete PNG byte stream.
///
/// # Arguments
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `pixels` - Row-major RGBA data, exactly `width * height * 4` bytes
///
/// # Errors
///
/// Returns `TextureError::Validation` if the buffer does not match the
/// dimensions, or `TextureError::Io` if the zlib stream fails.
pub fn encode_png(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>> {
    validate_buffer(width, height, pixels)?;

    #[cfg(feature = "debug-logging")]
    log::info!("encode_png: {width}x{height}, data_len={}", pixels.len());

    let raw = build_scanlines(width, pixels);
    let compressed = compress_scanlines(&raw)?;

    let ihdr = Ihdr { width, height }.into_chunk();
    let idat = Chunk::new(IDAT, compressed);
    let iend = Chunk::new(IEND, Vec::new());

    let mut buf = BytesMut::with_capacity(
        PNG_SIGNATURE.len() + ihdr.encoded_len() + idat.encoded_len() + iend.encoded_len(),
    );
    buf.put_slice(&PNG_SIGNATURE);
    ihdr.write_to(&mut buf);
    idat.write_to(&mut buf);
    iend.write_to(&mut buf);

    #[cfg(feature = "debug-logging")]
    log::info!("encode_png: produced {} bytes", buf.len());

    Ok(buf.into())
}

/// Encodes an RGBA buffer and writes the PNG stream into `writer`.
///
/// # Errors
///
/// Returns the errors of [`encode_png`], plus `TextureError::Io` if writing fails.
pub fn write_png<W: Write>(mut writer: W, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    let encoded = encode_png(width, height, pixels)?;
    writer.write_all(&encoded)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an RGBA buffer and writes it to `path`, replacing any existing file.
///
/// A partially written file is left in place on failure.
///
/// # Errors
///
/// Returns the errors of [`encode_png`], plus `TextureError::Io` if the file
/// cannot be created or written.
pub fn write_png_file(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    // Encode first so a validation failure never truncates an existing file
    let encoded = encode_png(width, height, pixels)?;
    std::fs::write(path, &encoded)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat((width * height) as usize)
    }

    #[test]
    fn test_ihdr_layout() {
        let ihdr = Ihdr {
            width: 256,
            height: 0x0102_0304,
        };
        assert_eq!(
            ihdr.to_bytes(),
            [0, 0, 1, 0, 1, 2, 3, 4, 8, 6, 0, 0, 0]
        );
    }

    #[test]
    fn test_stream_structure() {
        let png = encode_png(2, 2, &solid(2, 2, [1, 2, 3, 4])).unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
        // IHDR always follows the signature with a 13-byte payload
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..29], &Ihdr { width: 2, height: 2 }.to_bytes());
        assert_eq!(&png[37..41], b"IDAT");
        // IEND is the final 12 bytes
        assert_eq!(
            &png[png.len() - 12..],
            &[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn test_scanlines_have_filter_prefix() {
        let pixels: Vec<u8> = (0..24).collect();
        let raw = build_scanlines(3, &pixels);
        assert_eq!(raw.len(), 26);
        assert_eq!(raw[0], FILTER_NONE);
        assert_eq!(&raw[1..13], &pixels[..12]);
        assert_eq!(raw[13], FILTER_NONE);
        assert_eq!(&raw[14..26], &pixels[12..]);
    }

    #[test]
    fn test_idat_decompresses_to_scanlines() {
        let pixels: Vec<u8> = (0..64u8).collect();
        let png = encode_png(4, 4, &pixels).unwrap();

        let idat_len = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
        let idat = &png[41..41 + idat_len];
        let mut decoder = ZlibDecoder::new(idat);
        let mut raw = Vec::new();
        decoder.read_to_end(&mut raw).unwrap();

        assert_eq!(raw, build_scanlines(4, &pixels));
    }

    #[test]
    fn test_deterministic() {
        let pixels: Vec<u8> = (0..=255u8).cycle().take(16 * 16 * 4).collect();
        let a = encode_png(16, 16, &pixels).unwrap();
        let b = encode_png(16, 16, &pixels).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_buffer_too_small() {
        let result = encode_png(100, 100, &[0u8; 1000]);
        assert!(matches!(result, Err(TextureError::Validation(_))));
    }

    #[test]
    fn test_buffer_too_large() {
        let result = encode_png(2, 2, &[0u8; 17]);
        assert!(matches!(result, Err(TextureError::Validation(_))));
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            encode_png(0, 4, &[]),
            Err(TextureError::Validation(_))
        ));
        assert!(matches!(
            encode_png(4, 0, &[]),
            Err(TextureError::Validation(_))
        ));
    }

    #[test]
    fn test_dimension_above_png_limit() {
        let result = validate_buffer(MAX_DIMENSION + 1, 1, &[]);
        assert!(matches!(result, Err(TextureError::Validation(_))));
    }

    #[test]
    fn test_write_png_file_contents() {
        let path = std::env::temp_dir().join(format!(
            "test-textures-encoder-{}.png",
            std::process::id()
        ));
        let pixels = solid(4, 2, [200, 100, 50, 25]);
        write_png_file(&path, 4, 2, &pixels).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, encode_png(4, 2, &pixels).unwrap());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_png_file_validation_keeps_existing_file() {
        let path = std::env::temp_dir().join(format!(
            "test-textures-encoder-keep-{}.png",
            std::process::id()
        ));
        std::fs::write(&path, b"previous").unwrap();

        let result = write_png_file(&path, 4, 4, &[0u8; 3]);
        assert!(matches!(result, Err(TextureError::Validation(_))));
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_png_file_missing_directory() {
        let path = std::env::temp_dir()
            .join(format!("test-textures-missing-{}", std::process::id()))
            .join("out.png");
        let result = write_png_file(&path, 1, 1, &[0u8; 4]);
        assert!(matches!(result, Err(TextureError::Io(_))));
    }

    #[test]
    fn test_encoded_length_matches_chunks() {
        let png = encode_png(2, 2, &solid(2, 2, [1, 2, 3, 4])).unwrap();
        let idat_len = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
        // signature + IHDR + IDAT framing + IEND
        assert_eq!(png.len(), 8 + 25 + 12 + idat_len + 12);
    }

    #[test]
    fn test_write_png_matches_encode() {
        let pixels = solid(3, 5, [9, 8, 7, 6]);
        let mut out = Vec::new();
        write_png(&mut out, 3, 5, &pixels).unwrap();
        assert_eq!(out, encode_png(3, 5, &pixels).unwrap());
    }
}
