//! Translation of composite-space boxes back into single-tile space

use crate::spatial::geometry::{GeometryRecord, PixelBox};

/// Map a box found in a 2x2 composite into the frame of one tile
///
/// The origin wraps into the tile via modulo. The far edge is clamped to the
/// tile bounds rather than wrapped, so an element straddling a seam is only
/// reported up to the edge of the first tile it touches. Returns `None` when
/// the clipped box is empty or the tile size is zero.
///
/// An element wrapping both the right and bottom edges is truncated on both
/// axes; its remainder past the seams is not reported anywhere.
pub const fn remap(bbox: PixelBox, tile_width: u32, tile_height: u32) -> Option<GeometryRecord> {
    if tile_width == 0 || tile_height == 0 {
        return None;
    }

    let orig_x = bbox.x % tile_width;
    let orig_y = bbox.y % tile_height;

    let far_x = orig_x as u64 + bbox.width as u64;
    let far_y = orig_y as u64 + bbox.height as u64;
    let x2 = if far_x > tile_width as u64 {
        tile_width as u64
    } else {
        far_x
    };
    let y2 = if far_y > tile_height as u64 {
        tile_height as u64
    } else {
        far_y
    };

    let record = GeometryRecord::new(orig_x as i64, orig_y as i64, x2 as i64, y2 as i64);
    if record.is_degenerate() {
        None
    } else {
        Some(record)
    }
}
