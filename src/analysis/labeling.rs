//! Connected-component labeling of binary masks
//!
//! Two raster passes over the mask with a union-find over provisional labels.
//! Provisional labels grow in scan order and every union keeps the smaller
//! label as root, so a component's root is the label of its first pixel in
//! raster order. Final labels are handed out in that same order, which makes
//! region numbering stable for a given mask.

use crate::io::configuration::MASK_THRESHOLD;
use crate::spatial::PixelBox;
use bitvec::prelude::*;
use image::GrayImage;
use ndarray::Array2;

/// Label reserved for background pixels
pub const BACKGROUND: u32 = 0;

/// Pixel neighborhood used to join foreground pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Edge neighbors only
    Four,
    /// Edge and diagonal neighbors
    #[default]
    Eight,
}

/// A maximal connected set of foreground pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Label carried by the region's pixels (never `BACKGROUND`)
    pub label: u32,
    /// Minimal box containing every pixel of the region
    pub bbox: PixelBox,
    /// Number of pixels in the region
    pub area: usize,
}

/// Result of labeling one mask
///
/// Holds the per-pixel label grid (indexed `[row, col]`) alongside the
/// regions, so callers can test membership of any pixel.
#[derive(Debug, Clone)]
pub struct Labeling {
    labels: Array2<u32>,
    regions: Vec<Region>,
}

impl Labeling {
    /// Label grid, `BACKGROUND` where no region claims the pixel
    pub const fn labels(&self) -> &Array2<u32> {
        &self.labels
    }

    /// Regions ordered by label
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Mask dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        let (rows, cols) = self.labels.dim();
        (cols as u32, rows as u32)
    }

    /// Label at a pixel, `BACKGROUND` when outside the grid
    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or(BACKGROUND)
    }

    /// Check whether a pixel belongs to a region
    pub fn contains(&self, region: &Region, x: u32, y: u32) -> bool {
        self.label_at(x, y) == region.label
    }
}

/// Threshold a mask into row-major foreground bits
pub fn binarize(mask: &GrayImage) -> BitVec {
    mask.pixels().map(|p| p.0[0] > MASK_THRESHOLD).collect()
}

/// Disjoint sets over provisional labels; index 0 is unused
struct DisjointSet {
    parent: Vec<u32>,
}

impl DisjointSet {
    fn new() -> Self {
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut label: u32) -> u32 {
        // Path halving
        while let Some(&parent) = self.parent.get(label as usize) {
            if parent == label {
                break;
            }
            let grandparent = self.parent.get(parent as usize).copied().unwrap_or(parent);
            if let Some(slot) = self.parent.get_mut(label as usize) {
                *slot = grandparent;
            }
            label = grandparent;
        }
        label
    }

    fn union(&mut self, a: u32, b: u32) -> u32 {
        let root_a = self.find(a);
        let root_b = self.find(b);
        let (keep, merge) = if root_a <= root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        if let Some(slot) = self.parent.get_mut(merge as usize) {
            *slot = keep;
        }
        keep
    }

    fn len(&self) -> usize {
        self.parent.len()
    }
}

struct Extent {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    area: usize,
}

impl Extent {
    const fn new(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            area: 0,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.area += 1;
    }
}

/// Partition a mask's foreground into connected regions
///
/// The mask is binarized first (values above `MASK_THRESHOLD` are
/// foreground). Runs in time linear in the pixel count and places no bound
/// on the number of regions.
pub fn label(mask: &GrayImage, connectivity: Connectivity) -> Labeling {
    let (width, height) = mask.dimensions();
    let (cols, rows) = (width as usize, height as usize);
    let foreground = binarize(mask);

    let mut labels = Array2::<u32>::zeros((rows, cols));
    let mut sets = DisjointSet::new();
    let mut neighbors = Vec::with_capacity(4);

    for row in 0..rows {
        for col in 0..cols {
            if foreground.get(row * cols + col).as_deref() != Some(&true) {
                continue;
            }

            neighbors.clear();
            let mut push = |r: usize, c: usize| {
                if let Some(&l) = labels.get((r, c)) {
                    if l != BACKGROUND {
                        neighbors.push(l);
                    }
                }
            };
            if col > 0 {
                push(row, col - 1);
            }
            if row > 0 {
                push(row - 1, col);
                if connectivity == Connectivity::Eight {
                    if col > 0 {
                        push(row - 1, col - 1);
                    }
                    push(row - 1, col + 1);
                }
            }

            let assigned = match neighbors.iter().copied().min() {
                None => sets.make_set(),
                Some(first) => neighbors
                    .iter()
                    .fold(first, |root, &other| sets.union(root, other)),
            };
            if let Some(cell) = labels.get_mut((row, col)) {
                *cell = assigned;
            }
        }
    }

    // Second pass: flatten to roots, number roots by first appearance
    let mut final_label = vec![BACKGROUND; sets.len()];
    let mut extents: Vec<Extent> = Vec::new();

    for ((row, col), cell) in labels.indexed_iter_mut() {
        if *cell == BACKGROUND {
            continue;
        }
        let root = sets.find(*cell) as usize;
        let (x, y) = (col as u32, row as u32);

        let assigned = match final_label.get(root).copied() {
            Some(existing) if existing != BACKGROUND => existing,
            _ => {
                extents.push(Extent::new(x, y));
                let fresh = extents.len() as u32;
                if let Some(slot) = final_label.get_mut(root) {
                    *slot = fresh;
                }
                fresh
            }
        };

        if let Some(extent) = extents.get_mut(assigned as usize - 1) {
            extent.include(x, y);
        }
        *cell = assigned;
    }

    let regions = extents
        .iter()
        .enumerate()
        .map(|(index, extent)| Region {
            label: index as u32 + 1,
            bbox: PixelBox::new(
                extent.min_x,
                extent.min_y,
                extent.max_x - extent.min_x + 1,
                extent.max_y - extent.min_y + 1,
            ),
            area: extent.area,
        })
        .collect();

    Labeling { labels, regions }
}
