//! STB container reading module
//!
//! This module provides decoding of the fixed-layout STB sensor container.

mod reader;
mod stb_reader;
pub mod header;
pub mod types;

pub use reader::FrameReader;
pub use stb_reader::StbReader;
pub use types::PixelFrame;
