//! Input/output: CLI, configuration, files, manifests and errors

/// Command-line parsing and dispatch
pub mod cli;
/// Constants and typed configuration
pub mod configuration;
/// Error type
pub mod error;
/// Image loading and saving
pub mod image;
/// Elements manifest and geometry table
pub mod manifest;
/// Background colors interchange
pub mod palette;
/// Progress display
pub mod progress;
