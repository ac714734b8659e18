//! Bounding boxes in extraction space and serializable placement records

use crate::io::error::{Result, decode_error};

/// Axis-aligned box given by origin and size, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelBox {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in columns
    pub width: u32,
    /// Height in rows
    pub height: u32,
}

impl PixelBox {
    /// Create a box from origin and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Check if a pixel lies inside
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Convert into corner form
    pub const fn to_record(&self) -> GeometryRecord {
        GeometryRecord {
            x1: self.x as i64,
            y1: self.y as i64,
            x2: self.right() as i64,
            y2: self.bottom() as i64,
        }
    }
}

/// Placement box as two corners; `x2`/`y2` are exclusive
///
/// Signed so that records read back from JSON can describe boxes that fall
/// outside a canvas; composition rejects those rather than the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryRecord {
    /// Left edge
    pub x1: i64,
    /// Top edge
    pub y1: i64,
    /// Right edge (exclusive)
    pub x2: i64,
    /// Bottom edge (exclusive)
    pub y2: i64,
}

impl GeometryRecord {
    /// Create a record from corner coordinates
    pub const fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Horizontal extent (may be zero or negative for degenerate records)
    pub const fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    /// Vertical extent (may be zero or negative for degenerate records)
    pub const fn height(&self) -> i64 {
        self.y2 - self.y1
    }

    /// Whether the record encloses no pixels
    pub const fn is_degenerate(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Clockwise corner strings starting at the top-left
    ///
    /// Yields `["x1,y1", "x2,y1", "x2,y2", "x1,y2"]`.
    pub fn corners(&self) -> [String; 4] {
        [
            format!("{},{}", self.x1, self.y1),
            format!("{},{}", self.x2, self.y1),
            format!("{},{}", self.x2, self.y2),
            format!("{},{}", self.x1, self.y2),
        ]
    }

    /// Parse clockwise corner strings back into a record
    ///
    /// Only the top-left (index 0) and bottom-right (index 2) corners are
    /// read; the other two are redundant.
    ///
    /// # Errors
    ///
    /// Returns a decode error if fewer than three corners are present or a
    /// corner is not two comma-separated integers
    pub fn from_corners<S: AsRef<str>>(corners: &[S]) -> Result<Self> {
        let top_left = corners
            .first()
            .ok_or_else(|| decode_error("bbox", &"no corners"))?;
        let bottom_right = corners
            .get(2)
            .ok_or_else(|| decode_error("bbox", &"missing bottom-right corner"))?;

        let (x1, y1) = parse_corner(top_left.as_ref())?;
        let (x2, y2) = parse_corner(bottom_right.as_ref())?;
        Ok(Self::new(x1, y1, x2, y2))
    }
}

fn parse_corner(corner: &str) -> Result<(i64, i64)> {
    let (x, y) = corner
        .split_once(',')
        .ok_or_else(|| decode_error("bbox corner", &format!("'{corner}' is not 'x,y'")))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| decode_error("bbox corner", &format!("'{corner}': {e}")))
    };
    Ok((parse(x)?, parse(y)?))
}
