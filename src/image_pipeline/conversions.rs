//! Pipeline conversions module
//!
//! This module contains orchestration logic for STB container conversions:
//! the per-file pipeline and the batch driver that feeds it.

mod batch;
mod stb_to_raw;
mod timing;


pub use batch::{BatchConfig, BatchDriver, BatchSummary};
pub use stb_to_raw::{StbToRawPipeline, derive_output_path};
pub use timing::{FileTiming, PipelineTimings, Timer};
