use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::stb::types::PixelFrame;

pub trait FrameWriter {
    fn write_frame(&self, frame: &PixelFrame, output: &mut dyn Write) -> Result<()>;
}
