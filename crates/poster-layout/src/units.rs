//! Lengths that are simultaneously expressed in pixels and centimeters
//!
//! Every value carries the density (dpi) it was resolved against. Pixels are
//! the stored quantity; centimeters are derived on read, so converting
//! cm -> px -> cm never drifts by more than one pixel snap.
//!
//! Values from different dpi domains must never be combined. The checked
//! `try_*` methods report a [`LayoutError::DpiMismatch`]; the arithmetic
//! operators are meant for values known to share a domain and panic
//! otherwise.

use std::cmp::Ordering;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::constants::px_per_cm;
use crate::types::{LayoutError, Result};

/// Unit of a raw configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Cm,
}

impl FromStr for Unit {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "px" => Ok(Unit::Px),
            "cm" => Ok(Unit::Cm),
            other => Err(LayoutError::UnknownUnit(other.to_string())),
        }
    }
}

fn check_dpi(left: u32, right: u32) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(LayoutError::DpiMismatch { left, right })
    }
}

fn assert_dpi(left: u32, right: u32) {
    assert!(left == right, "dpi mismatch: {left} vs {right}");
}

// =============================================================================
// Length
// =============================================================================

/// A one-dimensional distance in a single dpi domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Length {
    px: i64,
    dpi: u32,
}

impl Length {
    pub fn from_px(px: i64, dpi: u32) -> Self {
        debug_assert!(dpi > 0, "dpi must be positive");
        Self { px, dpi }
    }

    /// Snap a centimeter value to the nearest pixel
    pub fn from_cm(cm: f64, dpi: u32) -> Self {
        Self::from_px((cm * px_per_cm(dpi)).round() as i64, dpi)
    }

    pub fn new(value: f64, unit: Unit, dpi: u32) -> Self {
        match unit {
            Unit::Px => Self::from_px(value.round() as i64, dpi),
            Unit::Cm => Self::from_cm(value, dpi),
        }
    }

    pub fn zero(dpi: u32) -> Self {
        Self::from_px(0, dpi)
    }

    pub fn px(self) -> i64 {
        self.px
    }

    pub fn cm(self) -> f64 {
        self.px as f64 / px_per_cm(self.dpi)
    }

    pub fn dpi(self) -> u32 {
        self.dpi
    }

    /// Uniformly scale, snapping the result to the nearest pixel
    pub fn scale(self, factor: f64) -> Self {
        Self::from_px((self.px as f64 * factor).round() as i64, self.dpi)
    }

    pub fn try_add(self, other: Length) -> Result<Self> {
        check_dpi(self.dpi, other.dpi)?;
        Ok(Self::from_px(self.px + other.px, self.dpi))
    }

    pub fn try_sub(self, other: Length) -> Result<Self> {
        check_dpi(self.dpi, other.dpi)?;
        Ok(Self::from_px(self.px - other.px, self.dpi))
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, other: Length) -> Length {
        assert_dpi(self.dpi, other.dpi);
        Length::from_px(self.px + other.px, self.dpi)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, other: Length) -> Length {
        assert_dpi(self.dpi, other.dpi);
        Length::from_px(self.px - other.px, self.dpi)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length::from_px(-self.px, self.dpi)
    }
}

impl PartialOrd for Length {
    /// Lengths from different dpi domains are incomparable
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.dpi == other.dpi).then(|| self.px.cmp(&other.px))
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// A (width, height) pair sharing one dpi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: Length,
    height: Length,
}

impl Dimensions {
    pub fn new(width: Length, height: Length) -> Result<Self> {
        check_dpi(width.dpi, height.dpi)?;
        Ok(Self { width, height })
    }

    pub fn from_px(width: i64, height: i64, dpi: u32) -> Self {
        Self {
            width: Length::from_px(width, dpi),
            height: Length::from_px(height, dpi),
        }
    }

    pub fn from_cm(width: f64, height: f64, dpi: u32) -> Self {
        Self {
            width: Length::from_cm(width, dpi),
            height: Length::from_cm(height, dpi),
        }
    }

    /// A square with both sides equal to `side`
    pub fn square(side: Length) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn zero(dpi: u32) -> Self {
        Self::from_px(0, 0, dpi)
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    pub fn dpi(&self) -> u32 {
        self.width.dpi
    }

    pub fn px(&self) -> (i64, i64) {
        (self.width.px, self.height.px)
    }

    pub fn cm(&self) -> (f64, f64) {
        (self.width.cm(), self.height.cm())
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        self.width.px as f64 / self.height.px as f64
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            width: self.width.scale(factor),
            height: self.height.scale(factor),
        }
    }

    pub fn try_add(&self, other: &Dimensions) -> Result<Self> {
        Ok(Self {
            width: self.width.try_add(other.width)?,
            height: self.height.try_add(other.height)?,
        })
    }

    pub fn try_sub(&self, other: &Dimensions) -> Result<Self> {
        Ok(Self {
            width: self.width.try_sub(other.width)?,
            height: self.height.try_sub(other.height)?,
        })
    }
}

impl Add for Dimensions {
    type Output = Dimensions;

    fn add(self, other: Dimensions) -> Dimensions {
        Dimensions {
            width: self.width + other.width,
            height: self.height + other.height,
        }
    }
}

impl Sub for Dimensions {
    type Output = Dimensions;

    fn sub(self, other: Dimensions) -> Dimensions {
        Dimensions {
            width: self.width - other.width,
            height: self.height - other.height,
        }
    }
}

// =============================================================================
// Position
// =============================================================================

/// An absolute offset from the poster's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(Dimensions);

impl Position {
    pub fn new(x: Length, y: Length) -> Result<Self> {
        Dimensions::new(x, y).map(Position)
    }

    pub fn from_px(x: i64, y: i64, dpi: u32) -> Self {
        Position(Dimensions::from_px(x, y, dpi))
    }

    pub fn from_cm(x: f64, y: f64, dpi: u32) -> Self {
        Position(Dimensions::from_cm(x, y, dpi))
    }

    pub fn origin(dpi: u32) -> Self {
        Position(Dimensions::zero(dpi))
    }

    pub fn x(&self) -> Length {
        self.0.width()
    }

    pub fn y(&self) -> Length {
        self.0.height()
    }

    pub fn dpi(&self) -> u32 {
        self.0.dpi()
    }

    pub fn xy_px(&self) -> (i64, i64) {
        self.0.px()
    }

    pub fn xy_cm(&self) -> (f64, f64) {
        self.0.cm()
    }

    /// Move by `offset`, checking the dpi
    pub fn offset(&self, offset: &Dimensions) -> Result<Self> {
        self.0.try_add(offset).map(Position)
    }
}

impl Add<Dimensions> for Position {
    type Output = Position;

    fn add(self, offset: Dimensions) -> Position {
        Position(self.0 + offset)
    }
}

impl Sub<Dimensions> for Position {
    type Output = Position;

    fn sub(self, offset: Dimensions) -> Position {
        Position(self.0 - offset)
    }
}

impl Sub for Position {
    type Output = Dimensions;

    /// Distance between two positions
    fn sub(self, other: Position) -> Dimensions {
        self.0 - other.0
    }
}
