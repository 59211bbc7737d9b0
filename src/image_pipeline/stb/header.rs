//! STB header parsing.
//!
//! The container starts with a fixed 16-byte header. Frame dimensions are
//! stored little-endian at fixed offsets; every other header byte carries
//! sensor metadata this pipeline does not interpret.

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Size of the fixed STB container header in bytes.
pub const HEADER_LEN: usize = 16;

/// Byte offset of the little-endian frame width within the header.
const WIDTH_OFFSET: usize = 8;

/// Byte offset of the little-endian frame height within the header.
const HEIGHT_OFFSET: usize = 12;

/// Extracts frame dimensions from an STB container header.
///
/// # Arguments
///
/// * `header` - The leading bytes of a container; at least [`HEADER_LEN`]
///
/// # Returns
///
/// * `Ok((width, height))` - Dimensions as declared by the header
/// * `Err(ConversionError::MalformedHeader)` - Fewer than 16 bytes supplied
///
/// Zero dimensions are passed through unchanged; the payload-size check and
/// pipeline validation reject them downstream.
pub fn parse_dimensions(header: &[u8]) -> Result<(u16, u16)> {
    if header.len() < HEADER_LEN {
        return Err(ConversionError::MalformedHeader(format!(
            "expected {} bytes, got {}",
            HEADER_LEN,
            header.len()
        )));
    }

    let width = u16::from_le_bytes([header[WIDTH_OFFSET], header[WIDTH_OFFSET + 1]]);
    let height = u16::from_le_bytes([header[HEIGHT_OFFSET], header[HEIGHT_OFFSET + 1]]);

    Ok((width, height))
}
