use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::stb::types::PixelFrame;

pub trait FrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<PixelFrame>;
}
