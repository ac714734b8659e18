//! Element extraction: crop labeled regions and rebuild their alpha

use crate::analysis::labeling::{Labeling, Region};
use crate::io::error::{Result, TilecutError};
use crate::spatial::GeometryRecord;
use image::{DynamicImage, GenericImageView, GrayImage, RgbaImage};

/// One extracted sub-image with its geometry
#[derive(Debug, Clone)]
pub struct Element {
    /// Cropped pixels; alpha is 255 on the region and 0 elsewhere
    pub image: RgbaImage,
    /// Source region in extraction space
    pub region: Region,
    /// Box in single-tile space, set when the element was remapped
    pub tile_record: Option<GeometryRecord>,
}

impl Element {
    /// Box in the space the element was extracted from
    pub const fn local_record(&self) -> GeometryRecord {
        self.region.bbox.to_record()
    }

    /// Box used for placement: the tile-space box when present
    pub fn placement(&self) -> GeometryRecord {
        self.tile_record.unwrap_or_else(|| self.local_record())
    }
}

fn check_dimensions(context: &'static str, expected: (u32, u32), found: (u32, u32)) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(TilecutError::DimensionMismatch {
            context,
            expected,
            found,
        })
    }
}

/// Cut every sufficiently large region out of an image
///
/// Regions with `area >= min_area` are kept in labeling order. Each crop
/// takes the region's bounding box from `rgba` (gaining an opaque alpha
/// channel if it had none) and replaces alpha with region membership, so
/// pixels of other regions or background inside the box become transparent.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `rgba`, `mask` and `labeling` do not all
/// share one size
pub fn extract(
    rgba: &DynamicImage,
    mask: &GrayImage,
    labeling: &Labeling,
    min_area: usize,
) -> Result<Vec<Element>> {
    check_dimensions("rgba/mask", mask.dimensions(), rgba.dimensions())?;
    check_dimensions("labeling/mask", mask.dimensions(), labeling.dimensions())?;

    let elements = labeling
        .regions()
        .iter()
        .filter(|region| region.area >= min_area)
        .map(|region| {
            let bbox = region.bbox;
            let mut image = rgba
                .crop_imm(bbox.x, bbox.y, bbox.width, bbox.height)
                .to_rgba8();

            for (px, py, pixel) in image.enumerate_pixels_mut() {
                let inside = labeling.contains(region, bbox.x + px, bbox.y + py);
                pixel.0[3] = if inside { u8::MAX } else { 0 };
            }

            Element {
                image,
                region: *region,
                tile_record: None,
            }
        })
        .collect();

    Ok(elements)
}

/// Combine an image's color with a mask used verbatim as alpha
///
/// # Errors
///
/// Returns `DimensionMismatch` if the mask size differs from the image
pub fn apply_mask_alpha(image: &DynamicImage, mask: &GrayImage) -> Result<RgbaImage> {
    check_dimensions("image/mask", image.dimensions(), mask.dimensions())?;

    let mut rgba = image.to_rgba8();
    for (pixel, alpha) in rgba.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = alpha.0[0];
    }
    Ok(rgba)
}
