use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::writer::FrameWriter;
use crate::image_pipeline::stb::types::PixelFrame;

pub struct StandardRawWriter;

impl FrameWriter for StandardRawWriter {
    /// Serializes a frame as a flat little-endian u16 sequence in row-major
    /// order, the exact inverse of the decode reshape. The whole frame is
    /// encoded into a buffer before anything touches `output`.
    fn write_frame(&self, frame: &PixelFrame, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding raw frame: {}x{}", frame.width, frame.height);

        let buffer: Vec<u8> = frame
            .data
            .iter()
            .flat_map(|&sample| sample.to_le_bytes())
            .collect();

        output.write_all(&buffer)?;

        debug!("Raw encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_little_endian_row_major() {
        let frame = PixelFrame {
            width: 2,
            height: 2,
            data: vec![0x0102, 0x0304, 0x0506, 0x0708],
        };

        let mut output = Vec::new();
        StandardRawWriter.write_frame(&frame, &mut output).unwrap();

        assert_eq!(output, vec![0x02, 0x01, 0x04, 0x03, 0x06, 0x05, 0x08, 0x07]);
    }
}
