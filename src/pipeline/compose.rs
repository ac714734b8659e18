//! Composition run: manifest + background colors -> final image

use crate::composition::{Compositor, Placement};
use crate::io::error::{Result, TilecutError};
use crate::io::image::save_png;
use crate::io::manifest::ElementsManifest;
use crate::io::palette::{BackgroundColors, RgbaColor};
use crate::io::progress::BatchProgress;
use image::{DynamicImage, RgbaImage};
use std::path::PathBuf;

/// Background used when the colors document cannot be parsed
pub const FALLBACK_BACKGROUND: RgbaColor = RgbaColor::new(0, 0, 0, 1.0);

/// Inputs and options for one composition run
#[derive(Debug, Clone)]
pub struct ComposeRequest {
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
    /// Draw a progress bar while pasting
    pub show_progress: bool,
}

/// What a composition run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeReport {
    /// Written image
    pub output_path: PathBuf,
    /// Elements painted
    pub painted: usize,
    /// Elements skipped for missing data, decode errors or bad boxes
    pub skipped: usize,
}

/// Exchange red and blue in place
pub fn swap_red_blue(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        pixel.0.swap(0, 2);
    }
}

fn background_color(request: &ComposeRequest) -> RgbaColor {
    match BackgroundColors::load(&request.colors_path) {
        Ok(colors) => colors.background_color1,
        Err(e) => {
            log::warn!("{e}; using background {FALLBACK_BACKGROUND}");
            FALLBACK_BACKGROUND
        }
    }
}

/// Compose the manifest's elements over `backgroundColor1`
///
/// Entries that lack data, fail to decode, or fall outside the canvas are
/// logged with their index and skipped.
///
/// # Errors
///
/// Returns `InputNotFound` if either input document is absent, a decode
/// error if the manifest is not valid JSON, or `ImageExport` if the result
/// cannot be saved
pub fn run_compose(request: &ComposeRequest) -> Result<ComposeReport> {
    for path in [&request.colors_path, &request.elements_path] {
        if !path.exists() {
            return Err(TilecutError::InputNotFound { path: path.clone() });
        }
    }

    let background = background_color(request);
    let manifest = ElementsManifest::load(&request.elements_path)?;
    log::info!(
        "Composing {} elements on {}x{} canvas, background {background}",
        manifest.masks.len(),
        request.width,
        request.height
    );

    let mut compositor = Compositor::new(request.width, request.height, background.to_canvas_rgba());
    let progress = BatchProgress::new(request.show_progress, manifest.masks.len(), "compose");
    let mut painted = 0;
    let mut skipped = 0;

    for (index, entry) in manifest.masks.iter().enumerate() {
        progress.tick(&format!("element {index}"));

        if entry.is_incomplete() {
            log::warn!("Element {index} is missing mask or bbox, skipped");
            skipped += 1;
            continue;
        }

        let prepared = entry.image().and_then(|image| Ok((image, entry.record()?)));
        let (mut image, target) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                log::error!("Element {index} skipped: {e}");
                skipped += 1;
                continue;
            }
        };

        if request.swap_red_blue {
            swap_red_blue(&mut image);
        }

        match compositor.place(index, &image, target) {
            Placement::Painted => painted += 1,
            Placement::Skipped(_) => skipped += 1,
        }
    }
    progress.finish();

    save_png(
        &DynamicImage::ImageRgba8(compositor.into_canvas()),
        &request.output_path,
    )?;
    log::info!("Composed image saved to {}", request.output_path.display());

    Ok(ComposeReport {
        output_path: request.output_path.clone(),
        painted,
        skipped,
    })
}
