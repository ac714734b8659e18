//! Toolkit constants and the typed JSON configuration

use crate::io::error::{Result, TilecutError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Mask values strictly above this are foreground
pub const MASK_THRESHOLD: u8 = 127;

/// Regions smaller than this are dropped unless overridden
pub const DEFAULT_MIN_AREA: usize = 100;

/// Default output directory for extraction runs
pub const DEFAULT_OUTPUT_DIR: &str = "merged_output";

/// Default configuration file looked up by the CLI
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Prefix for extracted element filenames
pub const ELEMENT_PREFIX: &str = "element_";

/// Subdirectory receiving element PNGs
pub const ELEMENTS_DIR: &str = "elements";

/// Manifest filename written next to the elements directory
pub const ELEMENTS_MANIFEST: &str = "elements_output.json";

/// Tab-separated geometry table written next to the manifest
pub const ELEMENTS_INFO: &str = "elements_info.txt";

/// Persisted 2x2 composite of the RGBA inputs
pub const MERGED_RGBA: &str = "merged_rgba.png";

/// Persisted 2x2 composite of the masks
pub const MERGED_MASK: &str = "merged_mask.png";

/// Default colors interchange file
pub const DEFAULT_COLORS_PATH: &str = "output/merged_output/colors_output.json";

/// Default elements manifest consumed by composition
pub const DEFAULT_ELEMENTS_PATH: &str = "output/merged_output/elements_output.json";

/// Default composed image path
pub const DEFAULT_COMPOSED_PATH: &str = "output/merged_final.png";

/// Default cutout output directory
pub const DEFAULT_CUTOUT_DIR: &str = "output/cutout_output";

/// Default composition canvas edge length
pub const DEFAULT_CANVAS_SIZE: u32 = 1536;

// Greedy color selection: strict pass, then relaxed pass
/// Minimum RGB distance between selected colors on the first pass
pub const COLOR_DISTANCE_STRICT: f64 = 30.0;
/// Minimum RGB distance on the relaxed second pass
pub const COLOR_DISTANCE_RELAXED: f64 = 15.0;
/// Number of background colors produced
pub const COLOR_SLOTS: usize = 3;

/// Progress bars are hidden for batches smaller than this
pub const MIN_PROGRESS_ITEMS: usize = 8;

/// Raster formats accepted when collecting a directory
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

/// How extraction treats its inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TileMode {
    /// Extract from one image; coordinates are reported as found
    Single,
    /// Tile four copies 2x2, extract, then remap into one tile
    #[default]
    Four,
}

/// Settings for element extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// RGBA cutout image
    pub rgba_path: Option<PathBuf>,
    /// Single-channel mask paired with the cutout
    pub mask_path: Option<PathBuf>,
    /// Directory receiving elements and manifests
    pub output_dir: PathBuf,
    /// Smallest region area kept
    pub min_area: usize,
    /// Single-image or four-tile extraction
    pub tile_mode: TileMode,
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            rgba_path: None,
            mask_path: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            min_area: DEFAULT_MIN_AREA,
            tile_mode: TileMode::default(),
        }
    }
}

/// Settings for re-composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeSection {
    /// Background colors interchange file
    pub colors_path: PathBuf,
    /// Elements manifest
    pub elements_path: PathBuf,
    /// Composed PNG
    pub output_path: PathBuf,
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Swap red and blue of decoded elements
    pub swap_red_blue: bool,
}

impl Default for ComposeSection {
    fn default() -> Self {
        Self {
            colors_path: PathBuf::from(DEFAULT_COLORS_PATH),
            elements_path: PathBuf::from(DEFAULT_ELEMENTS_PATH),
            output_path: PathBuf::from(DEFAULT_COMPOSED_PATH),
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            swap_red_blue: false,
        }
    }
}

/// Settings for dominant color analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsSection {
    /// Image file or directory to analyze
    pub input_path: Option<PathBuf>,
    /// Colors interchange file to write
    pub output_path: PathBuf,
}

impl Default for ColorsSection {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: PathBuf::from(DEFAULT_COLORS_PATH),
        }
    }
}

/// Settings for applying an external mask as alpha
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutoutSection {
    /// Image file or directory
    pub input_path: Option<PathBuf>,
    /// Mask produced by the segmentation step
    pub mask_path: Option<PathBuf>,
    /// Output directory
    pub output_dir: PathBuf,
    /// Also write the mask next to the cutout
    pub save_mask: bool,
}

impl Default for CutoutSection {
    fn default() -> Self {
        Self {
            input_path: None,
            mask_path: None,
            output_dir: PathBuf::from(DEFAULT_CUTOUT_DIR),
            save_mask: false,
        }
    }
}

/// Typed configuration passed into every entry point
///
/// Loaded from JSON; every field is optional in the file and falls back to
/// its default. Explicit CLI flags are applied on top by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Element extraction settings
    pub extract: ExtractSection,
    /// Composition settings
    pub compose: ComposeSection,
    /// Color analysis settings
    pub colors: ColorsSection,
    /// Cutout settings
    pub cutout: CutoutSection,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the file does not exist, cannot be read,
    /// or is not valid configuration JSON
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TilecutError::ConfigMissing {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| TilecutError::ConfigMissing {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json(&text).map_err(|e| TilecutError::ConfigMissing {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns a decode error if the text is not valid configuration JSON
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load configuration, logging and substituting defaults on failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }
}
