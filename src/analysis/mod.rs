//! Analysis of masks and images: labeling, extraction and color statistics

/// Dominant color selection
pub mod colors;
/// Cropping labeled regions into standalone elements
pub mod extraction;
/// Connected-component labeling
pub mod labeling;

pub use extraction::Element;
pub use labeling::{Connectivity, Labeling, Region};
