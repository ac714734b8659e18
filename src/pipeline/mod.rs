//! End-to-end runs wiring analysis, composition and file I/O
//!
//! Each run owns its buffers for its whole duration and processes inputs
//! sequentially.

/// Dominant color analysis run
pub mod colors;
/// Composition run
pub mod compose;
/// Mask-as-alpha cutout run
pub mod cutout;
/// Element extraction runs
pub mod extract;

pub use colors::run_colors;
pub use compose::{ComposeReport, ComposeRequest, run_compose};
pub use cutout::{CutoutRequest, run_cutout};
pub use extract::{ExtractRequest, ExtractionReport, run_extract};
