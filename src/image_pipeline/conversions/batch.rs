use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::stb_to_raw::StbToRawPipeline;
use crate::image_pipeline::conversions::timing::{PipelineTimings, Timer};
use crate::image_pipeline::raw::ConversionConfig;
use crate::image_pipeline::repack::TransformKind;

/// What a batch run processes and how it reacts to a failing file.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// A single container file, or a directory searched recursively
    pub input: PathBuf,
    /// Transforms applied to every discovered container
    pub transforms: Vec<TransformKind>,
    /// Abort the whole run on the first failing file instead of skipping it
    pub stop_on_error: bool,
}

impl BatchConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            transforms: vec![TransformKind::Raw],
            stop_on_error: false,
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub outputs: Vec<PathBuf>,
    pub timings: PipelineTimings,
}

/// Sequential driver: discovers containers, then runs decode, the selected
/// transforms, and writes for each file in turn through the pipeline. No
/// state is shared between files.
pub struct BatchDriver {
    config: BatchConfig,
}

impl BatchDriver {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    #[instrument(skip(self), fields(input = %self.config.input.display()))]
    pub fn run(&self) -> Result<BatchSummary> {
        let files = discover_inputs(&self.config.input)?;
        info!(count = files.len(), "Discovered input containers");

        let pipeline = StbToRawPipeline::new(
            ConversionConfig::builder()
                .transforms(self.config.transforms.clone())
                .build(),
        );

        let mut summary = BatchSummary::default();
        for path in files {
            let timer = Timer::start(path.display().to_string());

            match pipeline.convert_file(&path) {
                Ok(mut outputs) => {
                    summary.files_processed += 1;
                    summary.outputs.append(&mut outputs);
                }
                Err(e) => {
                    summary.files_failed += 1;
                    if self.config.stop_on_error {
                        error!(input = %path.display(), "Batch aborted: {}", e);
                        return Err(e);
                    }
                    warn!(input = %path.display(), "Skipping failed container: {}", e);
                }
            }

            let (name, duration) = timer.stop();
            summary.timings.add_file(name, duration);
        }

        Ok(summary)
    }
}

/// Resolves the batch input: the file itself, or every `.stb` file found
/// under the directory (case-insensitive extension), in sorted order.
fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut files = Vec::new();
        collect_stb_files(input, &mut files)?;
        files.sort();
        Ok(files)
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(ConversionError::InputReadError(format!(
            "{}: no such file or directory",
            input.display()
        )))
    }
}

fn collect_stb_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_stb_files(&path, files)?;
        } else if has_stb_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_stb_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stb"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::stb::header::HEADER_LEN;

    fn container(width: u16, height: u16) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[8..10].copy_from_slice(&width.to_le_bytes());
        data[12..14].copy_from_slice(&height.to_le_bytes());
        for i in 0..u32::from(width) * u32::from(height) {
            data.extend_from_slice(&(i as u16).to_le_bytes());
        }
        data
    }

    #[test]
    fn discovers_nested_mixed_case_containers() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("session").join("capture");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(dir.path().join("a.stb"), container(2, 2)).unwrap();
        std::fs::write(nested.join("b.STB"), container(2, 2)).unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a container").unwrap();

        let files = discover_inputs(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.stb", "b.STB"]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_inputs(&dir.path().join("absent.stb"));
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::InputReadError(_)
        ));
    }

    #[test]
    fn processes_every_container_with_every_transform() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.stb"), container(2, 25)).unwrap();
        std::fs::write(dir.path().join("two.stb"), container(3, 30)).unwrap();

        let config = BatchConfig {
            input: dir.path().to_path_buf(),
            transforms: vec![
                TransformKind::Raw,
                TransformKind::NvZeroPad,
                TransformKind::NvStandard,
            ],
            stop_on_error: false,
        };

        let summary = BatchDriver::new(config).run().unwrap();

        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_failed, 0);
        assert_eq!(summary.outputs.len(), 6);
        assert_eq!(summary.timings.files().len(), 2);
        for output in &summary.outputs {
            assert!(output.exists(), "{} missing", output.display());
        }
    }

    #[test]
    fn skips_failed_containers_by_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.stb"), b"too short").unwrap();
        std::fs::write(dir.path().join("good.stb"), container(2, 2)).unwrap();

        let summary = BatchDriver::new(BatchConfig::new(dir.path())).run().unwrap();

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.outputs.len(), 1);
    }

    #[test]
    fn aborts_on_failure_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.stb"), b"too short").unwrap();
        std::fs::write(dir.path().join("good.stb"), container(2, 2)).unwrap();

        let mut config = BatchConfig::new(dir.path());
        config.stop_on_error = true;

        let result = BatchDriver::new(config).run();
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::MalformedHeader(_)
        ));
    }

    #[test]
    fn single_file_input_skips_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.bin");
        std::fs::write(&path, container(2, 2)).unwrap();

        let summary = BatchDriver::new(BatchConfig::new(&path)).run().unwrap();
        assert_eq!(summary.files_processed, 1);
    }
}
