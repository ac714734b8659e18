//! Re-composition of extracted elements onto synthesized backgrounds

/// Solid-canvas compositor
pub mod compositor;

pub use compositor::{Compositor, Placement, SkipReason, compose};
