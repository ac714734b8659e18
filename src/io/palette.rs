//! Background color interchange: `backgroundColor1/2/3` as `[r, g, b, a]`

use crate::analysis::colors::Rgb;
use crate::io::error::{Result, TilecutError, decode_error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Color with 8-bit channels and a fractional alpha
///
/// Serialized as a four-element array, e.g. `[12, 200, 5, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(u8, u8, u8, f64)", into = "(u8, u8, u8, f64)")]
pub struct RgbaColor {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Opacity, 0.0 transparent to 1.0 opaque
    pub a: f64,
}

impl RgbaColor {
    /// Create a color from channels and fractional alpha
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from an RGB triple
    pub const fn opaque(rgb: Rgb) -> Self {
        let [r, g, b] = rgb;
        Self::new(r, g, b, 1.0)
    }

    /// Pixel value for a canvas
    ///
    /// Alpha in 0.0..=1.0 is scaled to 0..=255 with truncation; larger
    /// values are taken as already on the 0..=255 scale.
    pub fn to_canvas_rgba(&self) -> [u8; 4] {
        let alpha = if self.a <= 1.0 {
            (self.a.max(0.0) * 255.0) as u8
        } else {
            self.a.min(255.0) as u8
        };
        [self.r, self.g, self.b, alpha]
    }
}

impl From<(u8, u8, u8, f64)> for RgbaColor {
    fn from((r, g, b, a): (u8, u8, u8, f64)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<RgbaColor> for (u8, u8, u8, f64) {
    fn from(color: RgbaColor) -> Self {
        (color.r, color.g, color.b, color.a)
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:?})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for RgbaColor {
    type Err = TilecutError;

    /// Parse `rgba(r, g, b, a)`
    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| decode_error("rgba color", &format!("'{s}' is not rgba(...)")))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let &[r, g, b, a] = parts.as_slice() else {
            return Err(decode_error(
                "rgba color",
                &format!("'{s}' needs four components"),
            ));
        };

        let channel = |value: &str| {
            value
                .parse::<u8>()
                .map_err(|e| decode_error("rgba color", &format!("'{value}': {e}")))
        };
        let alpha = a
            .parse::<f64>()
            .map_err(|e| decode_error("rgba color", &format!("'{a}': {e}")))?;

        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?, alpha))
    }
}

/// The three synthesized background colors
///
/// Absent slots read and write as `[0, 0, 0, 0.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundColors {
    /// Primary background
    #[serde(rename = "backgroundColor1")]
    pub background_color1: RgbaColor,
    /// Secondary background
    #[serde(rename = "backgroundColor2")]
    pub background_color2: RgbaColor,
    /// Tertiary background
    #[serde(rename = "backgroundColor3")]
    pub background_color3: RgbaColor,
}

impl BackgroundColors {
    /// Fill slots in order from selected colors, all fully opaque
    pub fn from_selection(colors: &[Rgb]) -> Self {
        let slot = |i: usize| colors.get(i).copied().map(RgbaColor::opaque).unwrap_or_default();
        Self {
            background_color1: slot(0),
            background_color2: slot(1),
            background_color3: slot(2),
        }
    }

    /// Read the interchange document from disk
    ///
    /// # Errors
    ///
    /// Returns `InputNotFound` if the file is absent, or a decode error if it
    /// is not a valid colors document
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TilecutError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| TilecutError::FileSystem {
            path: path.to_path_buf(),
            operation: "read colors",
            source: e,
        })?;
        serde_json::from_str(&text)
            .map_err(|e| decode_error(path.display().to_string(), &e))
    }

    /// Write the interchange document, creating parent directories
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
