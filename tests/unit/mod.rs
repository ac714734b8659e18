
use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Mask from text rows: `#` is 255, anything else 0
pub fn mask_from_rows(rows: &[&str]) -> GrayImage {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    GrayImage::from_fn(width, height, |x, y| {
        let on = rows
            .get(y as usize)
            .and_then(|r| r.as_bytes().get(x as usize))
            .is_some_and(|&c| c == b'#');
        Luma([if on { 255 } else { 0 }])
    })
}

/// Opaque image whose every pixel encodes its own coordinates
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 77, 255])
    })
}
