//! Color analysis run: images -> background colors document

use crate::analysis::colors::{dominant_colors, summarize};
use crate::io::error::{Result, decode_error};
use crate::io::image::{collect_images, load_image};
use crate::io::palette::BackgroundColors;
use crate::io::progress::BatchProgress;
use std::path::Path;

/// Analyze one image or a directory of images and write the colors file
///
/// Images that fail to load are logged and skipped.
///
/// # Errors
///
/// Returns `InputNotFound` if the input path does not exist, a decode error
/// if no image could be analyzed, or `Serialization` if the document cannot
/// be written
pub fn run_colors(input: &Path, output: &Path, show_progress: bool) -> Result<BackgroundColors> {
    let images = collect_images(input)?;
    let progress = BatchProgress::new(show_progress, images.len(), "colors");

    let mut selections = Vec::with_capacity(images.len());
    for path in &images {
        progress.tick(&path.display().to_string());
        match load_image(path) {
            Ok(image) => {
                let colors = dominant_colors(&image);
                log::info!(
                    "{}: {}",
                    path.display(),
                    colors
                        .iter()
                        .map(|[r, g, b]| format!("rgb({r}, {g}, {b})"))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                selections.push(colors);
            }
            Err(e) => log::error!("Color analysis skipped {}: {e}", path.display()),
        }
    }
    progress.finish();

    if selections.is_empty() {
        return Err(decode_error(
            input.display().to_string(),
            &"no image could be analyzed",
        ));
    }

    let colors = BackgroundColors::from_selection(&summarize(&selections));
    colors.save(output)?;
    log::info!(
        "Background colors {}, {}, {} saved to {}",
        colors.background_color1,
        colors.background_color2,
        colors.background_color3,
        output.display()
    );
    Ok(colors)
}
