//! Cutout run: apply an externally produced mask as alpha

use crate::analysis::extraction::apply_mask_alpha;
use crate::io::error::{Result, TilecutError};
use crate::io::image::{collect_images, ensure_dir, load_image, load_mask, save_png};
use crate::io::progress::BatchProgress;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Cutout filename for a single input
pub const CUTOUT_FILE: &str = "rgba.png";

/// Mask copy filename
pub const MASK_FILE: &str = "mask.png";

/// Inputs and options for one cutout run
#[derive(Debug, Clone)]
pub struct CutoutRequest {
    /// Image file or directory
    pub input: PathBuf,
    /// Mask applied to every image
    pub mask: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Also write the mask
    pub save_mask: bool,
    /// Draw a progress bar over directory inputs
    pub show_progress: bool,
}

fn cutout_path(output_dir: &Path, input: &Path, batch: bool) -> PathBuf {
    if batch {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        output_dir.join(format!("{stem}_rgba.png"))
    } else {
        output_dir.join(CUTOUT_FILE)
    }
}

/// Write RGBA cutouts for one image or every image in a directory
///
/// In directory mode, images that fail to load or whose size differs from
/// the mask are logged and skipped. Returns the written cutout paths.
///
/// # Errors
///
/// Returns `InputNotFound` for missing inputs, and for a single image
/// `DimensionMismatch` or `ImageLoad`; write failures return `ImageExport`
pub fn run_cutout(request: &CutoutRequest) -> Result<Vec<PathBuf>> {
    let mask = load_mask(&request.mask)?;
    let images = collect_images(&request.input)?;
    let batch = request.input.is_dir();
    ensure_dir(&request.output_dir)?;

    if request.save_mask {
        save_png(
            &DynamicImage::ImageLuma8(mask.clone()),
            &request.output_dir.join(MASK_FILE),
        )?;
    }

    let progress = BatchProgress::new(request.show_progress, images.len(), "cutout");
    let item_level = if progress.is_visible() { log::Level::Debug } else { log::Level::Info };
    let mut written = Vec::with_capacity(images.len());

    for path in &images {
        progress.tick(&path.display().to_string());
        let cutout = load_image(path).and_then(|image| apply_mask_alpha(&image, &mask));
        let rgba = match cutout {
            Ok(rgba) => rgba,
            Err(e @ (TilecutError::DimensionMismatch { .. } | TilecutError::ImageLoad { .. }))
                if batch =>
            {
                log::error!("Cutout skipped {}: {e}", path.display());
                continue;
            }
            Err(e) => return Err(e),
        };

        let out = cutout_path(&request.output_dir, path, batch);
        save_png(&DynamicImage::ImageRgba8(rgba), &out)?;
        log::log!(item_level, "Cutout {} -> {}", path.display(), out.display());
        written.push(out);
    }
    progress.finish();

    Ok(written)
}
