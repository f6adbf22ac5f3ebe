//! Command-line interface for generating Markov images from PNG files

use crate::color::Threshold;
use crate::io::configuration::{DEFAULT_LOG_LEVEL, DEFAULT_THRESHOLD, OUTPUT_SUFFIX};
use crate::io::error::{MarkovError, Result, invalid_parameter};
use crate::io::image::{SourceImage, has_supported_extension, write_image};
use crate::io::progress::ProgressManager;
use crate::model::{MarkovImage, RandomSelector};
use crate::synthesis::FrontierOrder;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "markov-image")]
#[command(
    author,
    version,
    about = "Generate a new image using Markov chaining over source color adjacencies"
)]
/// Command-line arguments for the image generator
pub struct Cli {
    /// Input PNG file or directory of PNG files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output path (single-file targets only; defaults to <input>_markov.png)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Channel quantization step; colors closer than this share a state
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u8,

    /// Order in which the flood fill expands pending pixels
    #[arg(short, long, value_enum, default_value_t = FrontierOrder::Random)]
    pub frontier: FrontierOrder,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Fail if any output pixel is left unset
    #[arg(long)]
    pub require_full_coverage: bool,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validated quantization threshold
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is zero
    pub fn quantization(&self) -> Result<Threshold> {
        Threshold::new(self.threshold)
    }
}

/// Orchestrates generation over one file or a directory with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, decoding, generation or encoding fails
    pub fn process(&mut self) -> Result<()> {
        let threshold = self.cli.quantization()?;
        let jobs = self.collect_jobs()?;

        if jobs.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(jobs.len());
        }

        for (index, (input, output)) in jobs.iter().enumerate() {
            self.process_file(index, input, output, threshold)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Resolve (input, output) pairs, dropping those whose output already exists
    fn collect_jobs(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let target = &self.cli.target;
        let candidates = if target.is_file() {
            if !has_supported_extension(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ));
            }
            let output = self
                .cli
                .output
                .clone()
                .unwrap_or_else(|| Self::get_output_path(target));
            vec![(target.clone(), output)]
        } else if target.is_dir() {
            if self.cli.output.is_some() {
                return Err(invalid_parameter(
                    "output",
                    &target.display(),
                    &"--output can only be used with a single input file",
                ));
            }
            Self::list_inputs(target)?
                .into_iter()
                .map(|input| {
                    let output = Self::get_output_path(&input);
                    (input, output)
                })
                .collect()
        } else {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ));
        };

        Ok(candidates
            .into_iter()
            .filter(|(input, output)| self.should_process(input, output))
            .collect())
    }

    /// PNG inputs in `dir`, sorted, excluding outputs of earlier runs
    ///
    /// # Errors
    ///
    /// Returns a [`MarkovError::FileSystem`] naming `dir` if the directory or
    /// one of its entries cannot be read
    pub fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
        let read_error = |source| MarkovError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read directory",
            source,
        };
        let mut inputs = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && has_supported_extension(&path) && !Self::is_generated(&path) {
                inputs.push(path);
            }
        }
        inputs.sort();
        Ok(inputs)
    }

    fn should_process(&self, input: &Path, output: &Path) -> bool {
        if self.cli.skip_existing() && output.exists() {
            warn!(
                input = %input.display(),
                output = %output.display(),
                "skipping: output exists"
            );
            return false;
        }
        true
    }

    fn process_file(
        &mut self,
        index: usize,
        input: &Path,
        output: &Path,
        threshold: Threshold,
    ) -> Result<()> {
        let start_time = Instant::now();
        let source = SourceImage::open(input)?;
        let markov = MarkovImage::from_source(&source, threshold)?.with_order(self.cli.frontier);
        let total = markov.bounds().area();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input, total);
        }

        let mut selector = RandomSelector::new();
        let synthesis = match self.progress_manager.as_mut() {
            Some(pm) => markov
                .synthesizer()
                .run_with_progress(&mut selector, |assigned, _| {
                    pm.update_pixels(index, assigned);
                })?,
            None => markov.synthesize(&mut selector)?,
        };

        if self.cli.require_full_coverage {
            synthesis.ensure_complete()?;
        } else if !synthesis.is_complete() {
            warn!(
                input = %input.display(),
                unset = synthesis.unreached(),
                total,
                "some pixels were never reached"
            );
        }

        write_image(synthesis.grid(), markov.format(), output)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        info!(
            input = %input.display(),
            output = %output.display(),
            states = markov.model().state_count(),
            transitions = markov.model().transition_count(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "generated image"
        );

        Ok(())
    }

    fn is_generated(path: &Path) -> bool {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    /// Default output path: `<stem>_markov.<ext>` next to the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
