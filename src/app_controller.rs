use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::pipeline::Orchestrator;
use crate::providers::{AnyProvider, Provider};

// @module: Application controller for document translation runs

/// Outcome summary of a controller run over one or more files.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files translated and written
    pub translated: Vec<PathBuf>,
    /// Files skipped because the output already existed
    pub skipped: Vec<PathBuf>,
    /// Files that failed, with the pipeline error rendered
    pub failed: Vec<(PathBuf, String)>,
}

impl RunSummary {
    /// Whether every processed file succeeded or was skipped.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the workflow over a file or a directory of translatable files.
    ///
    /// Outputs land next to each input (or under `output_dir` when given)
    /// as `<stem>.<target_lang>.<ext>`; existing outputs are skipped unless
    /// `force_overwrite` is set.
    pub async fn run(
        &self,
        input_path: PathBuf,
        output_dir: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<RunSummary> {
        if !input_path.exists() {
            return Err(anyhow!("Input path does not exist: {:?}", input_path));
        }

        let files = if FileManager::dir_exists(&input_path) {
            FileManager::find_files(&input_path, &self.config.file_extensions)?
        } else {
            vec![input_path.clone()]
        };
        if files.is_empty() {
            return Err(anyhow!(
                "No translatable files (extensions {:?}) under {:?}",
                self.config.file_extensions,
                input_path
            ));
        }

        info!(
            "Translating {} file(s) {} -> {} via {}",
            files.len(),
            language_utils::get_language_name(&self.config.source_language),
            language_utils::get_language_name(&self.config.target_language),
            self.config.provider.kind.display_name()
        );

        // One orchestrator for the whole run, so the cache spans files
        let timeout = Duration::from_secs(self.config.pipeline.request_timeout_secs);
        let provider = Arc::new(AnyProvider::from_config(&self.config.provider, timeout));
        let orchestrator = Orchestrator::new(provider, &self.config.pipeline)?;

        let mut summary = RunSummary::default();
        for file in files {
            let output = self.output_path_for(&file, output_dir.as_deref());

            if FileManager::file_exists(&output) && !force_overwrite {
                warn!(
                    "Skipping {:?}, translation already exists (use -f to force overwrite)",
                    file
                );
                summary.skipped.push(file);
                continue;
            }

            match self.translate_one(&orchestrator, &file, &output).await {
                Ok(()) => summary.translated.push(file),
                Err(e) => {
                    error!("{:?}: {}", file, e);
                    summary.failed.push((file, e.to_string()));
                }
            }
        }

        let (hits, misses, hit_rate) = orchestrator.cache_stats();
        info!(
            "Done: {} translated, {} skipped, {} failed (cache: {} entr(ies), {} hit(s), {} miss(es), {:.0}%)",
            summary.translated.len(),
            summary.skipped.len(),
            summary.failed.len(),
            orchestrator.cache_len(),
            hits,
            misses,
            hit_rate * 100.0
        );

        Ok(summary)
    }

    async fn translate_one(
        &self,
        orchestrator: &Orchestrator<AnyProvider>,
        input: &Path,
        output: &Path,
    ) -> Result<(), PipelineError> {
        info!("Translating {:?}", input);

        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} units ({eta})",
            )
            .unwrap()
            .progress_chars("#>-"),
        );

        let bar = progress_bar.clone();
        let result = orchestrator
            .translate_file(
                input,
                output,
                &self.config.source_language,
                &self.config.target_language,
                move |done, total| {
                    bar.set_length(total as u64);
                    bar.set_position(done as u64);
                },
            )
            .await;

        match &result {
            Ok(()) => progress_bar.finish_and_clear(),
            Err(_) => progress_bar.abandon(),
        }

        result
    }

    /// Output path for one input file.
    fn output_path_for(&self, input: &Path, output_dir: Option<&Path>) -> PathBuf {
        let dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf());
        FileManager::generate_output_path(input, dir, &self.config.target_language)
    }

    /// Access the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
