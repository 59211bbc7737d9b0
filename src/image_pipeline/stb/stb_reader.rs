//! STB container reader implementation.
//!
//! This module decodes the proprietary STB capture container: a 16-byte
//! header followed by a flat payload of `width * height` little-endian u16
//! samples, reshaped into a row-major frame.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::stb::header::{self, HEADER_LEN};
use crate::image_pipeline::stb::reader::FrameReader;
use crate::image_pipeline::stb::types::PixelFrame;

/// Reader for the fixed-layout STB container.
pub struct StbReader;

impl FrameReader for StbReader {
    /// Decodes an STB container held in memory.
    ///
    /// This method:
    /// 1. Splits the container into the 16-byte header and the payload
    /// 2. Extracts the declared dimensions from the header
    /// 3. Checks that the payload holds exactly `2 * width * height` bytes
    /// 4. Reshapes the payload into a row-major frame of u16 samples
    ///
    /// Payload sample `i` lands at row `i / width`, column `i % width`; the
    /// container's sample order is preserved exactly, with no transposition.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw bytes of the STB container file
    ///
    /// # Returns
    ///
    /// * `Ok(PixelFrame)` - Successfully decoded frame
    /// * `Err(ConversionError::MalformedHeader)` - Container shorter than the header
    /// * `Err(ConversionError::PayloadSizeMismatch)` - Payload inconsistent with
    ///   the declared dimensions; never truncated or padded
    fn read_frame(&self, data: &[u8]) -> Result<PixelFrame> {
        debug!("Decoding STB container, {} bytes", data.len());

        if data.len() < HEADER_LEN {
            return Err(ConversionError::MalformedHeader(format!(
                "container holds {} bytes, header needs {}",
                data.len(),
                HEADER_LEN
            )));
        }

        let (head, payload) = data.split_at(HEADER_LEN);
        let (width, height) = header::parse_dimensions(head)?;
        let width = width as usize;
        let height = height as usize;

        debug!("Declared dimensions: {}x{}", width, height);

        let expected = 2 * width * height;
        if payload.len() != expected {
            return Err(ConversionError::PayloadSizeMismatch {
                width,
                height,
                expected,
                actual: payload.len(),
            });
        }

        let data: Vec<u16> = payload
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        debug!("Reshaped to {} rows of {} samples", height, width);

        Ok(PixelFrame {
            width,
            height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(width: u16, height: u16, samples: &[u16]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[8..10].copy_from_slice(&width.to_le_bytes());
        data[12..14].copy_from_slice(&height.to_le_bytes());
        for sample in samples {
            data.extend_from_slice(&sample.to_le_bytes());
        }
        data
    }

    #[test]
    fn decodes_row_major_frame() {
        let samples = [0x0010, 0x0020, 0x0030, 0x0040, 0x0050, 0x0060];
        let data = container(2, 3, &samples);

        let frame = StbReader.read_frame(&data).unwrap();

        assert_eq!(frame.width, 2);
        assert_eq!(frame.height, 3);
        assert_eq!(frame.row(0), &[0x10, 0x20]);
        assert_eq!(frame.row(1), &[0x30, 0x40]);
        assert_eq!(frame.row(2), &[0x50, 0x60]);
    }

    #[test]
    fn rejects_undersized_payload() {
        // 4x4 needs 32 payload bytes; supply 30
        let mut data = container(4, 4, &[0u16; 16]);
        data.truncate(HEADER_LEN + 30);

        let result = StbReader.read_frame(&data);
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::PayloadSizeMismatch {
                width: 4,
                height: 4,
                expected: 32,
                actual: 30,
            }
        ));
    }

    #[test]
    fn rejects_oversized_payload() {
        let data = container(2, 2, &[0u16; 5]);
        let result = StbReader.read_frame(&data);
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::PayloadSizeMismatch { .. }
        ));
    }

    #[test]
    fn rejects_container_shorter_than_header() {
        let data = vec![0u8; 10];
        let result = StbReader.read_frame(&data);
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::MalformedHeader(_)
        ));
    }

    #[test]
    fn zero_dimensions_with_payload_mismatch() {
        // A zeroed header declares 0x0, so any payload byte is excess
        let mut data = vec![0u8; HEADER_LEN];
        data.push(0xAB);

        let result = StbReader.read_frame(&data);
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::PayloadSizeMismatch { expected: 0, actual: 1, .. }
        ));
    }
}
