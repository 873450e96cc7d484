use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unknown unit '{0}' (expected 'px' or 'cm')")]
    UnknownUnit(String),
    #[error("Invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),
    #[error("DPI mismatch: {left} vs {right}")]
    DpiMismatch { left: u32, right: u32 },
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("Cell ({row}, {col}) is outside the {rows}x{columns} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    #[error("Font error: {0}")]
    Font(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Poster orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard poster sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosterSize {
    A0,
    A1,
    A2,
    A3,
    Custom { width_cm: f64, height_cm: f64 },
}

impl Default for PosterSize {
    fn default() -> Self {
        PosterSize::Custom {
            width_cm: 60.0,
            height_cm: 90.0,
        }
    }
}

impl PosterSize {
    /// Get base dimensions in centimeters (portrait for the ISO sizes)
    pub fn dimensions_cm(self) -> (f64, f64) {
        match self {
            PosterSize::A0 => (84.1, 118.9),
            PosterSize::A1 => (59.4, 84.1),
            PosterSize::A2 => (42.0, 59.4),
            PosterSize::A3 => (29.7, 42.0),
            PosterSize::Custom {
                width_cm,
                height_cm,
            } => (width_cm, height_cm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_cm();
        let (short, long) = if w <= h { (w, h) } else { (h, w) };
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

/// Which of the two signature blocks at the bottom of the poster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// An opaque sRGB color, written as `#RRGGBB` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LayoutError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| LayoutError::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = LayoutError;

    fn try_from(s: String) -> Result<Self> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Margin factors, relative to the poster height
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarginFactors {
    pub top: f64,
    pub bottom: f64,
    /// Shared by the left and right edge
    pub sides: f64,
}

impl Default for MarginFactors {
    fn default() -> Self {
        Self::uniform(0.01)
    }
}

impl MarginFactors {
    /// Same factor on all edges
    pub fn uniform(factor: f64) -> Self {
        Self {
            top: factor,
            bottom: factor,
            sides: factor,
        }
    }
}

/// A pair of factors applied to a width and a height respectively
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisFactors {
    pub horizontal: f64,
    pub vertical: f64,
}

impl AxisFactors {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Component-wise maximum
    pub fn max(self, other: AxisFactors) -> Self {
        Self {
            horizontal: self.horizontal.max(other.horizontal),
            vertical: self.vertical.max(other.vertical),
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            horizontal: self.horizontal * factor,
            vertical: self.vertical * factor,
        }
    }
}
