//! Typography requests handed to an external font capability
//!
//! The layout engine never rasterizes glyphs. It names a font file and a
//! pixel size, and asks a [`TextMeasurer`] for rendered widths when it has
//! to center text without anchor support.

use std::path::{Path, PathBuf};

use crate::types::Result;
use crate::units::Length;

/// A font file at a resolved size
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    path: PathBuf,
    size: Length,
}

impl FontSpec {
    pub(crate) fn new(path: impl Into<PathBuf>, size: Length) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Font height in the layout's dpi domain
    pub fn size(&self) -> Length {
        self.size
    }

    /// Pixel size to request from a font loader (at least one pixel)
    pub fn size_px(&self) -> u32 {
        self.size.px().max(1) as u32
    }
}

/// Measures the rendered width of a string
pub trait TextMeasurer {
    fn text_width_px(&self, font: &FontSpec, text: &str) -> Result<u32>;
}
