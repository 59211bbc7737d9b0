use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stb_repack_rs::image_pipeline::{BatchConfig, BatchDriver, TransformKind};
use stb_repack_rs::logger;

use tracing::{error, info};

/// Convert STB sensor containers to flat raw/NV pixel buffers.
#[derive(Parser, Debug)]
#[command(name = "stb_repack")]
#[command(about = "Convert STB sensor containers to raw/NV pixel buffers", long_about = None)]
struct Args {
    /// Input STB file, or a directory searched recursively for .stb files
    input: PathBuf,

    /// Transforms to apply to every frame
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "raw")]
    transforms: Vec<TransformArg>,

    /// Abort the whole batch on the first failing file
    #[arg(long)]
    stop_on_error: bool,

    /// Print a per-file timing summary after the run
    #[arg(long)]
    timings: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TransformArg {
    /// Header stripped only
    Raw,
    /// 4-bit shift, low nibble zero-filled
    Nv0,
    /// Region-aware shift with nibble merge
    NvStd,
}

impl From<TransformArg> for TransformKind {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::Raw => TransformKind::Raw,
            TransformArg::Nv0 => TransformKind::NvZeroPad,
            TransformArg::NvStd => TransformKind::NvStandard,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    info!("Starting stb_repack...");

    let config = BatchConfig {
        input: args.input,
        transforms: args.transforms.into_iter().map(Into::into).collect(),
        stop_on_error: args.stop_on_error,
    };
    let driver = BatchDriver::new(config);

    let summary = driver.run()?;

    info!(
        processed = summary.files_processed,
        failed = summary.files_failed,
        outputs = summary.outputs.len(),
        "Batch complete"
    );

    if args.timings {
        summary.timings.print_summary();
    }

    if summary.files_failed > 0 {
        error!("{} file(s) failed", summary.files_failed);
        std::process::exit(1);
    }

    Ok(())
}
