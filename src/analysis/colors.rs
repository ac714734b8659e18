//! Dominant color selection for background synthesis
//!
//! Colors are ranked by pixel count and picked greedily so that every pick
//! stays a minimum RGB distance away from earlier picks. When the strict
//! distance leaves slots empty, a second pass over the same ranking uses a
//! relaxed distance and only appends.

use crate::io::configuration::{COLOR_DISTANCE_RELAXED, COLOR_DISTANCE_STRICT, COLOR_SLOTS};
use image::{DynamicImage, RgbImage};
use std::collections::HashMap;

/// An 8-bit RGB triple
pub type Rgb = [u8; 3];

/// Euclidean distance between two colors in RGB space
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Distinct colors of an image with their pixel counts, most frequent first
///
/// Equal counts keep the order in which the colors first occur in a raster
/// scan.
pub fn rank_colors(image: &RgbImage) -> Vec<(Rgb, usize)> {
    let mut counts: HashMap<Rgb, (usize, usize)> = HashMap::new();
    for (position, pixel) in image.pixels().enumerate() {
        counts.entry(pixel.0).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(Rgb, usize, usize)> = counts
        .into_iter()
        .map(|(color, (count, first))| (color, count, first))
        .collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .map(|(color, count, _)| (color, count))
        .collect()
}

fn select_pass(ranked: &[Rgb], selected: &mut Vec<Rgb>, slots: usize, min_distance: f64) {
    for &color in ranked {
        if selected.len() >= slots {
            break;
        }
        if selected
            .iter()
            .all(|&chosen| color_distance(color, chosen) >= min_distance)
        {
            selected.push(color);
        }
    }
}

/// Greedily pick up to `slots` mutually distant colors from a ranking
///
/// Runs once at `strict`; if fewer than `slots` colors qualify, runs again
/// over the same ranking at `relaxed`, keeping the first pass's picks.
pub fn select_distinct(ranked: &[Rgb], slots: usize, strict: f64, relaxed: f64) -> Vec<Rgb> {
    let mut selected = Vec::with_capacity(slots);
    select_pass(ranked, &mut selected, slots, strict);
    if selected.len() < slots {
        select_pass(ranked, &mut selected, slots, relaxed);
    }
    selected
}

/// Up to three well-separated dominant colors of an image
pub fn dominant_colors(image: &DynamicImage) -> Vec<Rgb> {
    let ranked: Vec<Rgb> = rank_colors(&image.to_rgb8())
        .into_iter()
        .map(|(color, _)| color)
        .collect();
    select_distinct(
        &ranked,
        COLOR_SLOTS,
        COLOR_DISTANCE_STRICT,
        COLOR_DISTANCE_RELAXED,
    )
}

/// Merge per-image selections by how many images chose each color
///
/// Returns up to three colors; ties keep first appearance order.
pub fn summarize(per_image: &[Vec<Rgb>]) -> Vec<Rgb> {
    let mut votes: Vec<(Rgb, usize)> = Vec::new();
    for color in per_image.iter().flatten() {
        match votes.iter_mut().find(|(c, _)| c == color) {
            Some((_, count)) => *count += 1,
            None => votes.push((*color, 1)),
        }
    }

    // Stable sort keeps first-appearance order among equal votes
    votes.sort_by(|a, b| b.1.cmp(&a.1));
    votes
        .into_iter()
        .take(COLOR_SLOTS)
        .map(|(color, _)| color)
        .collect()
}
