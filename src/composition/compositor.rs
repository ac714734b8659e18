//! Pasting elements onto a solid background canvas

use crate::spatial::GeometryRecord;
use image::imageops::{self, FilterType};
use image::{Rgba, Rgba32FImage, RgbaImage};

/// Why an element was left off the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Box extends past the canvas
    OutOfBounds,
    /// Box has no area
    Degenerate,
}

/// Outcome of one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Element was painted
    Painted,
    /// Element was skipped
    Skipped(SkipReason),
}

/// Blend one channel of `top` over `base` weighted by `alpha`
const fn blend_channel(base: u8, top: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((top as u32 * a + base as u32 * (255 - a) + 127) / 255) as u8
}

/// Linear "over" blend using the top pixel's alpha as the weight
///
/// Alpha 255 yields `top` exactly and alpha 0 leaves `base` untouched. The
/// alpha channel itself is blended with the same weight.
pub const fn blend_pixel(base: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let alpha = top.0[3];
    match alpha {
        0 => base,
        255 => top,
        _ => Rgba([
            blend_channel(base.0[0], top.0[0], alpha),
            blend_channel(base.0[1], top.0[1], alpha),
            blend_channel(base.0[2], top.0[2], alpha),
            blend_channel(base.0[3], top.0[3], alpha),
        ]),
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Lanczos3 resize in premultiplied alpha
///
/// Color hidden under fully transparent pixels carries no weight, so it
/// cannot bleed into visible edge pixels.
pub fn resize_premultiplied(element: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut premultiplied = Rgba32FImage::new(element.width(), element.height());
    for (dst, src) in premultiplied.pixels_mut().zip(element.pixels()) {
        let [r, g, b, a] = src.0.map(|c| f32::from(c) / 255.0);
        *dst = Rgba([r * a, g * a, b * a, a]);
    }

    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    let mut straight = RgbaImage::new(width, height);
    for (dst, src) in straight.pixels_mut().zip(resized.pixels()) {
        let [r, g, b, a] = src.0;
        let unmultiply = |c: f32| if a > 0.0 { c / a } else { 0.0 };
        *dst = Rgba([
            to_channel(unmultiply(r)),
            to_channel(unmultiply(g)),
            to_channel(unmultiply(b)),
            to_channel(a),
        ]);
    }
    straight
}

/// Fixed-size canvas that elements are pasted onto in order
pub struct Compositor {
    canvas: RgbaImage,
}

impl Compositor {
    /// Create a canvas filled with one color
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Self {
        Self {
            canvas: RgbaImage::from_pixel(width, height, Rgba(background)),
        }
    }

    /// Current canvas
    pub const fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Finish and take the canvas
    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }

    /// Check a target box against the canvas
    pub fn check(&self, target: GeometryRecord) -> Option<SkipReason> {
        let (width, height) = self.canvas.dimensions();
        if target.x1 < 0
            || target.y1 < 0
            || target.x2 > i64::from(width)
            || target.y2 > i64::from(height)
        {
            Some(SkipReason::OutOfBounds)
        } else if target.is_degenerate() {
            Some(SkipReason::Degenerate)
        } else {
            None
        }
    }

    /// Resize an element to its target box and paste it over the canvas
    ///
    /// Boxes outside the canvas or without area are skipped and reported in
    /// the returned placement; later pastes cover earlier ones.
    pub fn paste(&mut self, element: &RgbaImage, target: GeometryRecord) -> Placement {
        if let Some(reason) = self.check(target) {
            return Placement::Skipped(reason);
        }

        let (w, h) = (target.width() as u32, target.height() as u32);
        let resized = if element.dimensions() == (w, h) {
            element.clone()
        } else {
            resize_premultiplied(element, w, h)
        };

        let (x0, y0) = (target.x1 as u32, target.y1 as u32);
        for (px, py, top) in resized.enumerate_pixels() {
            if let Some(base) = self.canvas.get_pixel_mut_checked(x0 + px, y0 + py) {
                *base = blend_pixel(*base, *top);
            }
        }

        Placement::Painted
    }

    /// Paste one element, logging the outcome under its index
    pub fn place(&mut self, index: usize, element: &RgbaImage, target: GeometryRecord) -> Placement {
        let placement = self.paste(element, target);
        match placement {
            Placement::Painted => log::debug!(
                "Pasted element {index} at ({},{}) size {}x{}",
                target.x1,
                target.y1,
                target.width(),
                target.height()
            ),
            Placement::Skipped(reason) => log::warn!(
                "Element {index} skipped ({reason:?}): ({},{})-({},{})",
                target.x1,
                target.y1,
                target.x2,
                target.y2
            ),
        }
        placement
    }
}

/// Compose elements onto a solid canvas in input order
///
/// Skipped elements are logged by index.
pub fn compose<'a, I>(background: [u8; 4], canvas_size: (u32, u32), elements: I) -> RgbaImage
where
    I: IntoIterator<Item = (&'a RgbaImage, GeometryRecord)>,
{
    let mut compositor = Compositor::new(canvas_size.0, canvas_size.1, background);
    for (index, (element, target)) in elements.into_iter().enumerate() {
        compositor.place(index, element, target);
    }
    compositor.into_canvas()
}
