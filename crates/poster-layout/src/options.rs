use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Poster sheet configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PosterConfig {
    pub size: PosterSize,
    pub orientation: Orientation,
    pub background: Color,
    /// Minimum margins, of poster height
    pub margin_factors: MarginFactors,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            size: PosterSize::default(),
            orientation: Orientation::Portrait,
            background: Color::WHITE,
            margin_factors: MarginFactors::default(),
        }
    }
}

impl PosterConfig {
    /// Physical (width, height) in centimeters
    pub fn dimensions_cm(&self) -> (f64, f64) {
        self.size.dimensions_with_orientation(self.orientation)
    }
}

/// Cover grid configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    /// Space between covers, of cover width and height
    pub cover_spacing_factors: AxisFactors,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 8,
            cover_spacing_factors: AxisFactors::new(0.01, 0.01),
        }
    }
}

/// Alternating background bands grouping covers by year
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct YearShadingConfig {
    pub enable: bool,
    pub color1: Color,
    pub color2: Color,
    /// How far a band reaches past the cover area, of cover width and height
    pub protrusion_factors: AxisFactors,
}

impl Default for YearShadingConfig {
    fn default() -> Self {
        Self {
            enable: true,
            color1: Color::WHITE,
            color2: Color::rgb(0xCC, 0xCC, 0xCC),
            protrusion_factors: AxisFactors::new(0.1, 0.05),
        }
    }
}

/// Per-book cover and caption configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BookConfig {
    pub print_rating: bool,
    pub font_path: PathBuf,
    /// Target cover width / height
    pub aspect_ratio: f64,
    /// Native pixel height of cover images; the dpi is derived from it
    pub reference_cover_height_px: u32,
    /// Caption font height, of cover height
    pub font_height_factor: f64,
    /// Gap above each caption line, of font height
    pub line_spacing_factor: f64,
    /// Caption lines reserved beneath each cover
    pub text_lines: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            print_rating: true,
            font_path: PathBuf::from(DEFAULT_BOOK_FONT),
            aspect_ratio: DEFAULT_COVER_ASPECT_RATIO,
            reference_cover_height_px: DEFAULT_REFERENCE_COVER_HEIGHT_PX,
            font_height_factor: 1.0 / 15.0,
            line_spacing_factor: 1.0 / 4.0,
            text_lines: DEFAULT_BOOK_TEXT_LINES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TitleConfig {
    pub enable: bool,
    pub font_path: PathBuf,
    /// Of poster height
    pub font_height_factor: f64,
    /// Gap between title and grid, of title font height
    pub spacing_factor: f64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            enable: true,
            font_path: PathBuf::from(DEFAULT_TITLE_FONT),
            font_height_factor: 0.02,
            spacing_factor: 0.5,
        }
    }
}

/// Footer with a QR code and a line of text on each side
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SignatureConfig {
    pub enable: bool,
    pub font_path: PathBuf,
    /// Block height, of title font height
    pub height_factor: f64,
    /// Gap between grid and signature, of signature height
    pub spacing_factor: f64,
    /// Of signature height
    pub font_height_factor: f64,
    /// Gap between QR code and text, of signature height
    pub hspace_factor: f64,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            enable: true,
            font_path: PathBuf::from(DEFAULT_SIGNATURE_FONT),
            height_factor: 1.2,
            spacing_factor: 0.3,
            font_height_factor: 0.35,
            hspace_factor: 0.35,
        }
    }
}

/// Complete ratio-based poster configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LayoutConfig {
    pub poster: PosterConfig,
    pub grid: GridConfig,
    pub year_shading: YearShadingConfig,
    pub book: BookConfig,
    pub title: TitleConfig,
    pub signature: SignatureConfig,
}

impl LayoutConfig {
    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Number of covers the grid can hold
    pub fn capacity(&self) -> usize {
        self.grid.columns * self.grid.rows
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(LayoutError::Config(format!(
                "Grid must have at least one row and one column (got {}x{})",
                self.grid.columns, self.grid.rows
            )));
        }

        let (width_cm, height_cm) = self.poster.dimensions_cm();
        positive("poster width", width_cm)?;
        positive("poster height", height_cm)?;
        positive("cover aspect ratio", self.book.aspect_ratio)?;

        if self.book.reference_cover_height_px == 0 {
            return Err(LayoutError::Config(
                "Reference cover height must be positive".to_string(),
            ));
        }

        let factors = [
            ("top margin factor", self.poster.margin_factors.top),
            ("bottom margin factor", self.poster.margin_factors.bottom),
            ("side margin factor", self.poster.margin_factors.sides),
            (
                "horizontal cover spacing factor",
                self.grid.cover_spacing_factors.horizontal,
            ),
            (
                "vertical cover spacing factor",
                self.grid.cover_spacing_factors.vertical,
            ),
            (
                "horizontal shading protrusion factor",
                self.year_shading.protrusion_factors.horizontal,
            ),
            (
                "vertical shading protrusion factor",
                self.year_shading.protrusion_factors.vertical,
            ),
            ("book line spacing factor", self.book.line_spacing_factor),
            ("title spacing factor", self.title.spacing_factor),
            ("signature spacing factor", self.signature.spacing_factor),
            ("signature hspace factor", self.signature.hspace_factor),
        ];
        for (name, value) in factors {
            non_negative(name, value)?;
        }

        positive("book font height factor", self.book.font_height_factor)?;
        positive("title font height factor", self.title.font_height_factor)?;
        positive("signature height factor", self.signature.height_factor)?;
        positive(
            "signature font height factor",
            self.signature.font_height_factor,
        )?;

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::Config(format!(
            "{} must be a positive number (got {})",
            name, value
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::Config(format!(
            "{} must be a non-negative number (got {})",
            name, value
        )))
    }
}
