//! Spatial primitives and coordinate-space handling
//!
//! This module contains:
//! - Pixel boxes and placement records
//! - 2x2 tiling of repeated images
//! - Remapping from composite space into one tile

/// Bounding boxes and placement records
pub mod geometry;
/// Composite-to-tile coordinate remapping
pub mod remap;
/// 2x2 image tiling
pub mod tiling;

pub use geometry::{GeometryRecord, PixelBox};
