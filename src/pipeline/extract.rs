//! Element extraction runs: single image and 2x2 seamless-tile variants

use crate::analysis::extraction::{Element, extract};
use crate::analysis::labeling::{Connectivity, label};
use crate::io::configuration::{
    ELEMENT_PREFIX, ELEMENTS_DIR, ELEMENTS_INFO, ELEMENTS_MANIFEST, MERGED_MASK, MERGED_RGBA,
    TileMode,
};
use crate::io::error::{Result, TilecutError, invalid_parameter};
use crate::io::image::{ensure_dir, load_image, load_mask, save_png, write_text};
use crate::io::manifest::{ElementsManifest, InfoRow, ManifestEntry, render_info_table};
use crate::io::progress::BatchProgress;
use crate::spatial::GeometryRecord;
use crate::spatial::remap::remap;
use crate::spatial::tiling::{TILE_COUNT, tile, tile_dynamic};
use image::{DynamicImage, GenericImageView, GrayImage};
use std::path::{Path, PathBuf};

/// Inputs and options for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    /// RGBA cutouts; one path, or four in reading order for tiled runs
    pub rgba_paths: Vec<PathBuf>,
    /// Masks matching `rgba_paths`
    pub mask_paths: Vec<PathBuf>,
    /// Directory receiving elements and manifests
    pub output_dir: PathBuf,
    /// Smallest region area kept
    pub min_area: usize,
    /// Single-image or four-tile extraction
    pub mode: TileMode,
    /// Draw a progress bar while writing elements
    pub show_progress: bool,
}

/// What a run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Element PNGs written, in index order
    pub element_paths: Vec<PathBuf>,
    /// Elements that failed to write and were left out
    pub failed: usize,
    /// Elements manifest
    pub manifest_path: PathBuf,
    /// Geometry table
    pub info_path: PathBuf,
}

/// Label a mask and extract every region of at least `min_area` pixels
///
/// # Errors
///
/// Returns `DimensionMismatch` if image and mask sizes differ
pub fn extract_single(
    rgba: &DynamicImage,
    mask: &GrayImage,
    min_area: usize,
) -> Result<Vec<Element>> {
    let labeling = label(mask, Connectivity::Eight);
    extract(rgba, mask, &labeling, min_area)
}

/// Tile four image/mask pairs 2x2
///
/// # Errors
///
/// Returns `DimensionMismatch` if the first image and mask differ in size,
/// or `ShapeMismatch` if the images or the masks disagree in shape
pub fn tile_inputs(
    rgbas: &[DynamicImage; TILE_COUNT],
    masks: &[GrayImage; TILE_COUNT],
) -> Result<(DynamicImage, GrayImage)> {
    let [first_rgba, ..] = rgbas;
    let [first_mask, ..] = masks;
    if first_rgba.dimensions() != first_mask.dimensions() {
        return Err(TilecutError::DimensionMismatch {
            context: "rgba/mask",
            expected: first_mask.dimensions(),
            found: first_rgba.dimensions(),
        });
    }
    Ok((tile_dynamic(rgbas)?, tile(masks)?))
}

/// Extract from a 2x2 composite and remap each element into one tile
///
/// Elements whose remapped box is empty are dropped; the rest carry their
/// tile-space record.
///
/// # Errors
///
/// Returns `DimensionMismatch` if composite image and mask sizes differ
pub fn extract_from_composite(
    merged_rgba: &DynamicImage,
    merged_mask: &GrayImage,
    tile_size: (u32, u32),
    min_area: usize,
) -> Result<Vec<Element>> {
    let elements = extract_single(merged_rgba, merged_mask, min_area)?;
    Ok(elements
        .into_iter()
        .filter_map(|mut element| {
            let record = remap(element.region.bbox, tile_size.0, tile_size.1);
            if record.is_none() {
                log::debug!("Dropping element {} with empty tile box", element.region.label);
            }
            element.tile_record = Some(record?);
            Some(element)
        })
        .collect())
}

/// Filename for an element, with tile-space geometry when remapped
pub fn element_filename(index: usize, tile_record: Option<GeometryRecord>) -> String {
    match tile_record {
        Some(r) => format!(
            "{ELEMENT_PREFIX}{index:03}_orig_x{}_y{}_w{}_h{}.png",
            r.x1,
            r.y1,
            r.width(),
            r.height()
        ),
        None => format!("{ELEMENT_PREFIX}{index:03}.png"),
    }
}

fn resolve_paths(paths: &[PathBuf], mode: TileMode, what: &'static str) -> Result<Vec<PathBuf>> {
    match (mode, paths) {
        (_, []) => Err(invalid_parameter(what, &"<none>", &"at least one path is required")),
        (TileMode::Single, [first, rest @ ..]) => {
            if !rest.is_empty() {
                log::warn!("Single mode uses only the first {what}: {}", first.display());
            }
            Ok(vec![first.clone()])
        }
        (TileMode::Four, [only]) => {
            log::info!("Repeating {what} {} four times", only.display());
            Ok(vec![only.clone(); TILE_COUNT])
        }
        (TileMode::Four, paths) if paths.len() == TILE_COUNT => Ok(paths.to_vec()),
        (TileMode::Four, paths) => Err(invalid_parameter(
            what,
            &paths.len(),
            &"four-tile mode takes one path or four",
        )),
    }
}

fn load_quad<T>(paths: &[PathBuf], load: impl Fn(&Path) -> Result<T>) -> Result<[T; TILE_COUNT]> {
    let loaded = paths
        .iter()
        .map(|p| load(p.as_path()))
        .collect::<Result<Vec<T>>>()?;
    let count = loaded.len();
    loaded
        .try_into()
        .map_err(|_| invalid_parameter("paths", &count, &"expected four inputs"))
}

/// Run extraction end to end and write elements, manifest and table
///
/// Per-element write failures are logged and the element is left out of the
/// manifest; validation failures abort the run.
///
/// # Errors
///
/// Returns `InputNotFound`, `ImageLoad`, `ShapeMismatch` or
/// `DimensionMismatch` for unusable inputs, and `FileSystem` or
/// `Serialization` if the output directory or documents cannot be written
pub fn run_extract(request: &ExtractRequest) -> Result<ExtractionReport> {
    let rgba_paths = resolve_paths(&request.rgba_paths, request.mode, "rgba path")?;
    let mask_paths = resolve_paths(&request.mask_paths, request.mode, "mask path")?;
    ensure_dir(&request.output_dir)?;

    let elements = match request.mode {
        TileMode::Single => {
            let (Some(rgba_path), Some(mask_path)) = (rgba_paths.first(), mask_paths.first())
            else {
                return Err(invalid_parameter("paths", &0, &"no inputs resolved"));
            };
            let rgba = load_image(rgba_path)?;
            let mask = load_mask(mask_path)?;
            extract_single(&rgba, &mask, request.min_area)?
        }
        TileMode::Four => {
            let rgbas = load_quad(&rgba_paths, load_image)?;
            let masks = load_quad(&mask_paths, load_mask)?;
            let [first, ..] = &rgbas;
            let tile_size = first.dimensions();

            let (merged_rgba, merged_mask) = tile_inputs(&rgbas, &masks)?;
            drop((rgbas, masks));
            log::info!(
                "Tiled 4 inputs into {}x{}",
                merged_rgba.width(),
                merged_rgba.height()
            );
            save_png(&merged_rgba, &request.output_dir.join(MERGED_RGBA))?;
            save_png(
                &DynamicImage::ImageLuma8(merged_mask.clone()),
                &request.output_dir.join(MERGED_MASK),
            )?;

            extract_from_composite(&merged_rgba, &merged_mask, tile_size, request.min_area)?
        }
    };

    write_outputs(request, &elements)
}

fn write_outputs(request: &ExtractRequest, elements: &[Element]) -> Result<ExtractionReport> {
    let elements_dir = request.output_dir.join(ELEMENTS_DIR);
    ensure_dir(&elements_dir)?;

    let progress = BatchProgress::new(request.show_progress, elements.len(), "elements");
    let item_level = if progress.is_visible() { log::Level::Debug } else { log::Level::Info };
    let mut manifest = ElementsManifest::default();
    let mut rows = Vec::with_capacity(elements.len());
    let mut element_paths = Vec::with_capacity(elements.len());
    let mut failed = 0;

    for (index, element) in elements.iter().enumerate() {
        let filename = element_filename(index, element.tile_record);
        let path = elements_dir.join(&filename);
        progress.tick(&filename);

        let written = save_png(&DynamicImage::ImageRgba8(element.image.clone()), &path)
            .and_then(|()| ManifestEntry::new(&element.image, element.placement()));
        match written {
            Ok(entry) => {
                log::log!(item_level, "Saved element {filename}");
                manifest.masks.push(entry);
                rows.push(InfoRow {
                    index,
                    filename,
                    placement: element.placement(),
                    composite: element.tile_record.map(|_| element.local_record()),
                });
                element_paths.push(path);
            }
            Err(e) if e.is_per_item() => {
                log::error!("Element {index} skipped: {e}");
                let _ = std::fs::remove_file(&path);
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    progress.finish();

    let manifest_path = request.output_dir.join(ELEMENTS_MANIFEST);
    manifest.save(&manifest_path)?;
    let info_path = request.output_dir.join(ELEMENTS_INFO);
    write_text(&info_path, &render_info_table(&rows))?;

    log::info!(
        "Extracted {} elements into {}",
        element_paths.len(),
        elements_dir.display()
    );

    Ok(ExtractionReport {
        element_paths,
        failed,
        manifest_path,
        info_path,
    })
}
