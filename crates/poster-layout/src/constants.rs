//! Shared constants for poster layout
//!
//! This module centralizes magic numbers and default values used throughout
//! layout resolution.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Pixels per centimeter at the given density
#[inline]
pub fn px_per_cm(dpi: u32) -> f64 {
    dpi as f64 / CM_PER_INCH
}

// =============================================================================
// Book Covers
// =============================================================================

/// Median width/height ratio of a large set of downloaded covers
pub const DEFAULT_COVER_ASPECT_RATIO: f64 = 0.6555;

/// Common pixel height of downloaded cover images, used to derive the dpi
pub const DEFAULT_REFERENCE_COVER_HEIGHT_PX: u32 = 475;

/// Text lines reserved beneath each cover (read date, pages and rating)
pub const DEFAULT_BOOK_TEXT_LINES: usize = 2;

// =============================================================================
// Fonts
// =============================================================================

pub const DEFAULT_BOOK_FONT: &str = "./fonts/Lato-star.ttf";
pub const DEFAULT_TITLE_FONT: &str = "./fonts/Merriweather-Regular.ttf";
pub const DEFAULT_SIGNATURE_FONT: &str = "./fonts/Lato-star.ttf";
