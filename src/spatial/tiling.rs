//! 2x2 tiling of four equal-sized images
//!
//! A seamless tile is repeated four times so that elements straddling its
//! edges appear whole in the composite and can be labeled in one piece.

use crate::io::error::{Result, TilecutError};
use image::{DynamicImage, GenericImage, GenericImageView, ImageBuffer, Pixel};

/// Number of images consumed by one tiling
pub const TILE_COUNT: usize = 4;

/// Column/row offsets of each input in units of the tile size
///
/// Reading order: top-left, top-right, bottom-left, bottom-right.
pub const TILE_OFFSETS: [(u32, u32); TILE_COUNT] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Tile four same-typed buffers into one twice as wide and twice as tall
///
/// # Errors
///
/// Returns `ShapeMismatch` if any input differs from the first in size
pub fn tile<P>(
    images: &[ImageBuffer<P, Vec<P::Subpixel>>; TILE_COUNT],
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>>
where
    P: Pixel,
{
    let [first, ..] = images;
    let (width, height) = first.dimensions();
    let channels = P::CHANNEL_COUNT;

    for (index, img) in images.iter().enumerate() {
        if img.dimensions() != (width, height) {
            return Err(TilecutError::ShapeMismatch {
                index,
                expected: (width, height, channels),
                found: (img.width(), img.height(), channels),
            });
        }
    }

    let mut merged = ImageBuffer::new(width * 2, height * 2);
    for (img, (col, row)) in images.iter().zip(TILE_OFFSETS) {
        merged
            .copy_from(img, col * width, row * height)
            .map_err(|e| TilecutError::ImageExport {
                path: "<tile>".into(),
                source: e,
            })?;
    }

    Ok(merged)
}

/// Tile four decoded images, requiring a shared size and channel layout
///
/// Luma, RGB and RGBA inputs keep their layout; any other 8/16-bit or float
/// layout is normalized to RGBA8 before tiling.
///
/// # Errors
///
/// Returns `ShapeMismatch` if any input differs from the first in size or
/// channel count
pub fn tile_dynamic(images: &[DynamicImage; TILE_COUNT]) -> Result<DynamicImage> {
    let [first, ..] = images;
    let (width, height) = first.dimensions();
    let channels = first.color().channel_count();

    for (index, img) in images.iter().enumerate() {
        let found = (img.width(), img.height(), img.color().channel_count());
        if found != (width, height, channels) {
            return Err(TilecutError::ShapeMismatch {
                index,
                expected: (width, height, channels),
                found,
            });
        }
    }

    let merged = match first {
        DynamicImage::ImageLuma8(_) => {
            DynamicImage::ImageLuma8(tile(&images.each_ref().map(DynamicImage::to_luma8))?)
        }
        DynamicImage::ImageRgb8(_) => {
            DynamicImage::ImageRgb8(tile(&images.each_ref().map(DynamicImage::to_rgb8))?)
        }
        _ => DynamicImage::ImageRgba8(tile(&images.each_ref().map(DynamicImage::to_rgba8))?),
    };

    Ok(merged)
}
