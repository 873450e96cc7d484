//! Resolved layout data types
//!
//! These types hold the absolute geometry produced by the resolver. A
//! [`PosterLayout`] can only be built by [`resolve_layout`](super::resolve_layout)
//! and exposes read-only views, so it can be shared freely once created.

use std::fmt;

use crate::typography::FontSpec;
use crate::types::Color;
use crate::units::{Dimensions, Length};

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Resolved poster margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Length,
    pub bottom: Length,
    /// Shared by the left and right edge
    pub sides: Length,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosterParameters {
    pub background: Color,
    pub size: Dimensions,
    pub margins: Margins,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridParameters {
    pub columns: usize,
    pub rows: usize,
    /// All cells together
    pub area: Dimensions,
    /// One cover plus its spacing and caption lines
    pub cell: Dimensions,
    pub cover_spacing: Dimensions,
}

impl GridParameters {
    /// Total number of cells in the grid
    pub fn n_books_total(&self) -> usize {
        self.columns * self.rows
    }

    /// Whether a cell lies inside the grid
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookParameters {
    pub print_rating: bool,
    pub aspect_ratio: f64,
    /// Box reserved for the cover image alone
    pub cover_area: Dimensions,
    pub font: FontSpec,
    /// Gap above each caption line
    pub line_spacing: Length,
    pub text_lines: usize,
}

impl BookParameters {
    pub fn font_size(&self) -> Length {
        self.font.size()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearShadingParameters {
    pub enable: bool,
    pub color1: Color,
    pub color2: Color,
    pub protrusion: Dimensions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleParameters {
    pub enable: bool,
    pub font: FontSpec,
    /// Gap between title and grid
    pub spacing: Length,
}

impl TitleParameters {
    pub fn font_size(&self) -> Length {
        self.font.size()
    }

    /// Vertical space the title takes above the grid
    pub fn block_height(&self) -> Length {
        if self.enable {
            self.font.size() + self.spacing
        } else {
            Length::zero(self.spacing.dpi())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureParameters {
    pub enable: bool,
    pub font: FontSpec,
    /// Gap between grid and signature
    pub spacing: Length,
    /// Gap between QR code and text
    pub hspace: Length,
    /// Side of the square QR code
    pub height: Length,
}

impl SignatureParameters {
    pub fn font_size(&self) -> Length {
        self.font.size()
    }

    /// Vertical space the signature takes below the grid
    pub fn block_height(&self) -> Length {
        if self.enable {
            self.height + self.spacing
        } else {
            Length::zero(self.spacing.dpi())
        }
    }
}

/// Fully resolved poster geometry
#[derive(Debug, Clone, PartialEq)]
pub struct PosterLayout {
    pub(crate) poster: PosterParameters,
    pub(crate) grid: GridParameters,
    pub(crate) year_shading: YearShadingParameters,
    pub(crate) book: BookParameters,
    pub(crate) title: TitleParameters,
    pub(crate) signature: SignatureParameters,
    pub(crate) dpi: u32,
}

impl PosterLayout {
    pub fn poster(&self) -> &PosterParameters {
        &self.poster
    }

    pub fn grid(&self) -> &GridParameters {
        &self.grid
    }

    pub fn year_shading(&self) -> &YearShadingParameters {
        &self.year_shading
    }

    pub fn book(&self) -> &BookParameters {
        &self.book
    }

    pub fn title(&self) -> &TitleParameters {
        &self.title
    }

    pub fn signature(&self) -> &SignatureParameters {
        &self.signature
    }

    /// The single density every length in this layout was resolved against
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Human readable overview of the resolved geometry
    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            dpi: self.dpi,
            poster_px: self.poster.size.px(),
            poster_cm: self.poster.size.cm(),
            grid: (self.grid.columns, self.grid.rows),
            cell_px: self.grid.cell.px(),
            cover_area_px: self.book.cover_area.px(),
            margins_px: (
                self.poster.margins.top.px(),
                self.poster.margins.bottom.px(),
                self.poster.margins.sides.px(),
            ),
        }
    }
}

/// Headline numbers of a layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    pub dpi: u32,
    pub poster_px: (i64, i64),
    pub poster_cm: (f64, f64),
    /// (columns, rows)
    pub grid: (usize, usize),
    pub cell_px: (i64, i64),
    pub cover_area_px: (i64, i64),
    /// (top, bottom, sides)
    pub margins_px: (i64, i64, i64),
}

impl fmt::Display for LayoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Poster Layout:")?;
        writeln!(f, "  DPI: {}", self.dpi)?;
        writeln!(
            f,
            "  Poster: {}x{} px ({:.1}x{:.1} cm)",
            self.poster_px.0, self.poster_px.1, self.poster_cm.0, self.poster_cm.1
        )?;
        writeln!(f, "  Grid: {} columns x {} rows", self.grid.0, self.grid.1)?;
        writeln!(f, "  Cell: {}x{} px", self.cell_px.0, self.cell_px.1)?;
        writeln!(
            f,
            "  Cover area: {}x{} px",
            self.cover_area_px.0, self.cover_area_px.1
        )?;
        write!(
            f,
            "  Margins: top {} px, bottom {} px, sides {} px",
            self.margins_px.0, self.margins_px.1, self.margins_px.2
        )
    }
}
