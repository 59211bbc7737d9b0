use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    raw::{ConversionConfig, FrameWriter, StandardRawWriter},
    repack::{self, TransformKind},
    stb::{FrameReader, PixelFrame, StbReader},
};

pub struct StbToRawPipeline<R: FrameReader, W: FrameWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl StbToRawPipeline<StbReader, StandardRawWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: StbReader,
            writer: StandardRawWriter,
            config,
        }
    }
}

impl<R: FrameReader, W: FrameWriter> StbToRawPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Decodes a container held in memory and validates its dimensions.
    pub fn decode(&self, input_data: &[u8]) -> Result<PixelFrame> {
        let frame = {
            let _span = tracing::info_span!("decode_stb").entered();
            self.reader.read_frame(input_data)?
        };

        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = frame.width,
                height = frame.height
            )
            .entered();
            self.validate_dimensions(frame.width, frame.height)?;
        }

        Ok(frame)
    }

    /// Decodes a container, applies one transform, and writes the repacked
    /// frame to `output`.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(
        &self,
        input_data: &[u8],
        kind: TransformKind,
        output: &mut dyn Write,
    ) -> Result<()> {
        info!("Starting STB to raw conversion");

        let frame = self.decode(input_data)?;

        let packed = {
            let _span = tracing::info_span!("repack", transform = kind.label()).entered();
            repack::apply(&frame, kind)?
        };

        {
            let _span = tracing::info_span!("encode_raw").entered();
            self.writer.write_frame(&packed, output)?;
        }

        info!(
            width = frame.width,
            height = frame.height,
            transform = kind.label(),
            "Conversion complete"
        );
        Ok(())
    }

    /// Reads a container file, decodes it once, and writes one sibling
    /// `.raw` file per configured transform. Returns the created paths.
    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Vec<PathBuf>> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Converting file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let frame = self.decode(&input_data)?;

        let mut outputs = Vec::with_capacity(self.config.transforms.len());
        for &kind in &self.config.transforms {
            let packed = {
                let _span = tracing::info_span!("repack", transform = kind.label()).entered();
                repack::apply(&frame, kind)?
            };

            let output_path = derive_output_path(input_path, kind, frame.width, frame.height);
            self.commit_frame(&packed, &output_path)?;

            info!(
                output = %output_path.display(),
                transform = kind.label(),
                "Wrote frame"
            );
            outputs.push(output_path);
        }

        Ok(outputs)
    }

    /// Encodes into a temporary sibling and renames it over the destination,
    /// so a failed write never leaves a truncated file at the output path.
    fn commit_frame(&self, frame: &PixelFrame, output_path: &Path) -> Result<()> {
        let mut tmp_name = output_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let written = std::fs::File::create(&tmp_path)
            .map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", tmp_path.display(), e))
            })
            .and_then(|mut file| self.writer.write_frame(frame, &mut file));

        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e);
        }

        std::fs::rename(&tmp_path, output_path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

/// Derives the sibling output path for a transform: the input file name
/// minus its final 4 characters (the `.stb` extension), then
/// `_<width>x<height>_<label>.raw`. The strip is blind; a name of 4 or
/// fewer characters yields an empty stem.
pub fn derive_output_path(
    input: &Path,
    kind: TransformKind,
    width: usize,
    height: usize,
) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let cut = name
        .char_indices()
        .rev()
        .nth(3)
        .map(|(index, _)| index)
        .unwrap_or(0);
    let stem = &name[..cut];

    let file_name = format!("{stem}_{width}x{height}_{}.raw", kind.label());
    input.with_file_name(file_name)
}
