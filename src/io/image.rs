//! Image loading and PNG export at stage boundaries

use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{Result, TilecutError};
use image::{DynamicImage, GrayImage, ImageFormat};
use std::path::{Path, PathBuf};

/// Load any supported raster image
///
/// # Errors
///
/// Returns `InputNotFound` if the path does not exist, or `ImageLoad` if
/// the file cannot be decoded
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(TilecutError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    image::open(path).map_err(|e| TilecutError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load an image as a single-channel mask
///
/// # Errors
///
/// Returns `InputNotFound` if the path does not exist, or `ImageLoad` if
/// the file cannot be decoded
pub fn load_mask(path: &Path) -> Result<GrayImage> {
    Ok(load_image(path)?.to_luma8())
}

/// Create the parent directory of an output path
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Create a directory and its ancestors
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| TilecutError::FileSystem {
        path: dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })
}

/// Save an image as PNG, creating parent directories
///
/// A partially written file is removed on failure.
///
/// # Errors
///
/// Returns `FileSystem` if the parent cannot be created, or `ImageExport`
/// if encoding or writing fails
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| {
            let _ = std::fs::remove_file(path);
            TilecutError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            }
        })
}

/// Write a text document, creating parent directories
///
/// # Errors
///
/// Returns `Serialization` if the file cannot be written
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).map_err(|e| TilecutError::Serialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Check whether a path has a supported raster extension
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Collect images from a file or, recursively, from a directory
///
/// Directory results are sorted for a stable processing order.
///
/// # Errors
///
/// Returns `InputNotFound` if the path does not exist, or `FileSystem` if a
/// directory cannot be read
pub fn collect_images(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }
    if !target.is_dir() {
        return Err(TilecutError::InputNotFound {
            path: target.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let mut pending = vec![target.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| TilecutError::FileSystem {
            path: dir.clone(),
            operation: "read directory",
            source: e,
        })?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if is_image_path(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
