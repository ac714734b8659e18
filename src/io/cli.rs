//! Command-line interface: flags over config-file defaults

use crate::io::configuration::{
    ColorsSection, ComposeSection, Config, CutoutSection, DEFAULT_CONFIG_PATH, ExtractSection,
    TileMode,
};
use crate::io::error::{Result, TilecutError};
use crate::pipeline::{
    ComposeRequest, CutoutRequest, ExtractRequest, run_colors, run_compose, run_cutout,
    run_extract,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tilecut")]
#[command(
    author,
    version,
    about = "Extract masked elements from seamless tiles and re-compose them"
)]
/// Command-line arguments shared by every subcommand
pub struct Cli {
    /// Configuration file supplying defaults
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract connected elements from a cutout and its mask
    Extract(ExtractArgs),
    /// Paste extracted elements onto a background color
    Compose(ComposeArgs),
    /// Pick background colors from dominant image colors
    Colors(ColorsArgs),
    /// Apply a segmentation mask as an image's alpha channel
    Cutout(CutoutArgs),
}

/// Flags for `extract`
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// RGBA cutout(s): one, or four in order top-left, top-right, bottom-left, bottom-right
    #[arg(long, value_name = "PATH", num_args = 1..=4)]
    pub rgba: Vec<PathBuf>,

    /// Mask(s) in the same order as the cutouts
    #[arg(long, value_name = "PATH", num_args = 1..=4)]
    pub mask: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Smallest region area kept, in pixels
    #[arg(long)]
    pub min_area: Option<usize>,

    /// Single image or four-tile extraction
    #[arg(long, value_enum)]
    pub mode: Option<TileMode>,
}

impl ExtractArgs {
    /// Combine flags with config defaults; `None` when inputs are missing
    pub fn resolve(&self, config: &ExtractSection, show_progress: bool) -> Option<ExtractRequest> {
        let rgba_paths = if self.rgba.is_empty() {
            vec![config.rgba_path.clone()?]
        } else {
            self.rgba.clone()
        };
        let mask_paths = if self.mask.is_empty() {
            vec![config.mask_path.clone()?]
        } else {
            self.mask.clone()
        };

        Some(ExtractRequest {
            rgba_paths,
            mask_paths,
            output_dir: self
                .output
                .clone()
                .unwrap_or_else(|| config.output_dir.clone()),
            min_area: self.min_area.unwrap_or(config.min_area),
            mode: self.mode.unwrap_or(config.tile_mode),
            show_progress,
        })
    }
}

/// Flags for `compose`
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Background colors document
    #[arg(long)]
    pub colors: Option<PathBuf>,

    /// Elements manifest
    #[arg(long)]
    pub elements: Option<PathBuf>,

    /// Output PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Swap red and blue channels of decoded elements
    #[arg(long)]
    pub swap_red_blue: bool,
}

impl ComposeArgs {
    /// Combine flags with config defaults
    pub fn resolve(&self, config: &ComposeSection, show_progress: bool) -> ComposeRequest {
        ComposeRequest {
            colors_path: self
                .colors
                .clone()
                .unwrap_or_else(|| config.colors_path.clone()),
            elements_path: self
                .elements
                .clone()
                .unwrap_or_else(|| config.elements_path.clone()),
            output_path: self
                .output
                .clone()
                .unwrap_or_else(|| config.output_path.clone()),
            width: self.width.unwrap_or(config.width),
            height: self.height.unwrap_or(config.height),
            swap_red_blue: self.swap_red_blue || config.swap_red_blue,
            show_progress,
        }
    }
}

/// Flags for `colors`
#[derive(Args, Debug)]
pub struct ColorsArgs {
    /// Image file or directory
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Colors document to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ColorsArgs {
    /// Input and output paths; `None` when no input is configured
    pub fn resolve(&self, config: &ColorsSection) -> Option<(PathBuf, PathBuf)> {
        let input = self.input.clone().or_else(|| config.input_path.clone())?;
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.output_path.clone());
        Some((input, output))
    }
}

/// Flags for `cutout`
#[derive(Args, Debug)]
pub struct CutoutArgs {
    /// Image file or directory
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Segmentation mask
    #[arg(short, long)]
    pub mask: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the mask
    #[arg(long)]
    pub save_mask: bool,
}

impl CutoutArgs {
    /// Combine flags with config defaults; `None` when inputs are missing
    pub fn resolve(&self, config: &CutoutSection, show_progress: bool) -> Option<CutoutRequest> {
        Some(CutoutRequest {
            input: self.input.clone().or_else(|| config.input_path.clone())?,
            mask: self.mask.clone().or_else(|| config.mask_path.clone())?,
            output_dir: self
                .output
                .clone()
                .unwrap_or_else(|| config.output_dir.clone()),
            save_mask: self.save_mask || config.save_mask,
            show_progress,
        })
    }
}

/// Initialize logging at `info`, or `warn` when quiet; `RUST_LOG` overrides
pub fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Dispatches a parsed command line against its configuration
pub struct Runner {
    cli: Cli,
    config: Config,
}

impl Runner {
    /// Load the configuration named by the CLI, falling back to defaults
    pub fn new(cli: Cli) -> Self {
        let config = Config::load_or_default(&cli.config);
        Self::with_config(cli, config)
    }

    /// Use an already loaded configuration
    pub const fn with_config(cli: Cli, config: Config) -> Self {
        Self { cli, config }
    }

    /// Check if progress bars should be drawn
    pub const fn should_show_progress(&self) -> bool {
        !self.cli.quiet
    }

    /// Run the selected operation
    ///
    /// Missing inputs are reported and end the run successfully.
    ///
    /// # Errors
    ///
    /// Returns validation, decode and write errors from the operation
    pub fn run(&self) -> Result<()> {
        let progress = self.should_show_progress();
        let outcome = match &self.cli.command {
            Command::Extract(args) => {
                let Some(request) = args.resolve(&self.config.extract, progress) else {
                    log::error!("No rgba/mask input: pass --rgba and --mask or set extract.rgba_path and extract.mask_path");
                    return Ok(());
                };
                log::info!(
                    "Output directory: {}, minimum area: {}",
                    request.output_dir.display(),
                    request.min_area
                );
                run_extract(&request).map(|report| {
                    log::info!(
                        "Wrote {} elements, manifest {}, table {}",
                        report.element_paths.len(),
                        report.manifest_path.display(),
                        report.info_path.display()
                    );
                })
            }
            Command::Compose(args) => {
                let request = args.resolve(&self.config.compose, progress);
                run_compose(&request).map(|report| {
                    log::info!(
                        "Painted {} elements, skipped {}",
                        report.painted,
                        report.skipped
                    );
                })
            }
            Command::Colors(args) => {
                let Some((input, output)) = args.resolve(&self.config.colors) else {
                    log::error!("No color input: pass --input or set colors.input_path");
                    return Ok(());
                };
                run_colors(&input, &output, progress).map(|_| ())
            }
            Command::Cutout(args) => {
                let Some(request) = args.resolve(&self.config.cutout, progress) else {
                    log::error!("No cutout input: pass --input and --mask or set cutout.input_path and cutout.mask_path");
                    return Ok(());
                };
                run_cutout(&request).map(|written| {
                    log::info!("Wrote {} cutouts", written.len());
                })
            }
        };

        match outcome {
            Err(TilecutError::InputNotFound { path }) => {
                log::error!("Input not found: {}", path.display());
                Ok(())
            }
            other => other,
        }
    }
}
