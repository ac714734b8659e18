//! Elements manifest: embedded PNGs with clockwise corner boxes
//!
//! ```json
//! { "masks": [ { "mask": "data:image/png;base64,...",
//!                "bbox": ["x1,y1", "x2,y1", "x2,y2", "x1,y2"] } ] }
//! ```

use crate::io::error::{Result, TilecutError, decode_error};
use crate::spatial::GeometryRecord;
use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Cursor;
use std::path::Path;

/// Prefix of the embedded image strings
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode an image as a PNG data URI
///
/// # Errors
///
/// Returns `ImageExport` if PNG encoding fails
pub fn encode_data_uri(image: &RgbaImage) -> Result<String> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| TilecutError::ImageExport {
            path: "<data uri>".into(),
            source: e,
        })?;
    Ok(format!(
        "{DATA_URI_PREFIX}{}",
        general_purpose::STANDARD.encode(&bytes)
    ))
}

/// Decode a data URI (or bare base64) into RGBA pixels
///
/// Everything up to and including `base64,` is ignored.
///
/// # Errors
///
/// Returns a decode error for invalid base64 or undecodable image bytes
pub fn decode_data_uri(uri: &str) -> Result<RgbaImage> {
    let payload = uri
        .split_once("base64,")
        .map_or(uri, |(_, data)| data)
        .trim();
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| decode_error("embedded image", &e))?;
    let image = image::load_from_memory(&bytes).map_err(|e| decode_error("embedded image", &e))?;
    Ok(image.to_rgba8())
}

/// One embedded element and its placement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// PNG data URI
    #[serde(default)]
    pub mask: String,
    /// Clockwise corners starting top-left
    #[serde(default)]
    pub bbox: Vec<String>,
}

impl ManifestEntry {
    /// Embed an element image with its placement box
    ///
    /// # Errors
    ///
    /// Returns `ImageExport` if PNG encoding fails
    pub fn new(image: &RgbaImage, record: GeometryRecord) -> Result<Self> {
        Ok(Self {
            mask: encode_data_uri(image)?,
            bbox: record.corners().to_vec(),
        })
    }

    /// Whether either field is empty
    pub fn is_incomplete(&self) -> bool {
        self.mask.is_empty() || self.bbox.is_empty()
    }

    /// Placement box from the corner strings
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed corners
    pub fn record(&self) -> Result<GeometryRecord> {
        GeometryRecord::from_corners(&self.bbox)
    }

    /// Decoded element pixels
    ///
    /// # Errors
    ///
    /// Returns a decode error for a malformed data URI
    pub fn image(&self) -> Result<RgbaImage> {
        decode_data_uri(&self.mask)
    }
}

/// The full elements document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementsManifest {
    /// Entries in extraction order
    #[serde(default)]
    pub masks: Vec<ManifestEntry>,
}

impl ElementsManifest {
    /// Read a manifest from disk
    ///
    /// # Errors
    ///
    /// Returns `InputNotFound` if the file is absent, or a decode error if
    /// it is not a manifest document
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TilecutError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| TilecutError::FileSystem {
            path: path.to_path_buf(),
            operation: "read manifest",
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| decode_error(path.display().to_string(), &e))
    }

    /// Write the manifest, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the document cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|e| TilecutError::Serialization {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        crate::io::image::write_text(path, &text)
    }
}

/// One row of the tab-separated geometry table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    /// Element index
    pub index: usize,
    /// Written filename
    pub filename: String,
    /// Placement box (tile space when remapped)
    pub placement: GeometryRecord,
    /// Box in the 2x2 composite, for tiled runs
    pub composite: Option<GeometryRecord>,
}

/// Render the geometry table with a header line
pub fn render_info_table(rows: &[InfoRow]) -> String {
    let tiled = rows.iter().any(|row| row.composite.is_some());
    let mut out = String::from("index\tfilename\tx\ty\twidth\theight");
    if tiled {
        out.push_str("\tmerged_x\tmerged_y\tmerged_width\tmerged_height");
    }
    out.push('\n');

    for row in rows {
        let p = row.placement;
        let _ = write!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.index,
            row.filename,
            p.x1,
            p.y1,
            p.width(),
            p.height()
        );
        if let Some(c) = row.composite {
            let _ = write!(out, "\t{}\t{}\t{}\t{}", c.x1, c.y1, c.width(), c.height());
        }
        out.push('\n');
    }
    out
}
