//! Element extraction from cutout/mask pairs and re-composition onto backgrounds
//!
//! Foreground regions of a mask are labeled as 8-connected components and
//! cropped out of the paired cutout as standalone elements. Seamless tiles
//! can be repeated 2x2 first so elements crossing an edge are captured
//! whole, then mapped back into one tile. Elements are later pasted at their
//! recorded boxes onto a solid background color.

#![forbid(unsafe_code)]

/// Connected-component labeling, element extraction and color statistics
pub mod analysis;
/// Pasting elements onto a background canvas
pub mod composition;
/// Input/output operations, configuration and error handling
pub mod io;
/// End-to-end runs combining the other modules
pub mod pipeline;
/// Geometry, tiling and coordinate remapping
pub mod spatial;

pub use io::error::{Result, TilecutError};
