//! Image processing pipeline module
//!
//! This module provides a structured approach to STB container conversion,
//! with separate modules for container reading, pixel repacking, raw
//! writing, and conversion orchestration.

pub mod common;
pub mod conversions;
pub mod raw;
pub mod repack;
pub mod stb;

pub use common::{
    ConversionError,
    Result,
};

pub use stb::{
    FrameReader,
    PixelFrame,
    StbReader,
};

pub use repack::TransformKind;

pub use raw::{
    ConversionConfig,
    ConversionConfigBuilder,
    FrameWriter,
    StandardRawWriter,
};

pub use conversions::{
    BatchConfig,
    BatchDriver,
    BatchSummary,
    StbToRawPipeline,
};
