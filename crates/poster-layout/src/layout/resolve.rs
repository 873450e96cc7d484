//! Layout parameter resolution
//!
//! Turns the ratio-based [`LayoutConfig`] into absolute geometry in a single
//! closed-form pass:
//! 1. Margins, title and signature blocks from ratios of the poster height
//! 2. Grid area and an even split into cells
//! 3. Cover area inside each cell
//! 4. Aspect-ratio reconciliation, moving leftover space into the margins
//! 5. Spacing and shading protrusion from the final cover area
//! 6. The dpi that keeps covers near their native resolution
//!
//! All intermediate values are centimeters. Pixels only appear once the dpi
//! is known.

use log::{debug, info};

use crate::constants::CM_PER_INCH;
use crate::options::{BookConfig, LayoutConfig};
use crate::typography::FontSpec;
use crate::types::{AxisFactors, LayoutError, Result};
use crate::units::{Dimensions, Length};

use super::{
    BookParameters, GridParameters, Margins, PosterLayout, PosterParameters, SignatureParameters,
    TitleParameters, YearShadingParameters,
};

/// Resolve a configuration into an immutable poster layout.
///
/// # Errors
/// * [`LayoutError::Config`] for invalid configurations (see
///   [`LayoutConfig::validate`])
/// * [`LayoutError::DegenerateGeometry`] when the poster is too small for
///   the requested grid
pub fn resolve_layout(config: &LayoutConfig) -> Result<PosterLayout> {
    config.validate()?;

    let mut plan = natural_plan(config)?;
    let adjusted = plan.reconcile(config.book.aspect_ratio);
    debug!(
        "Aspect ratio reconciliation adjusted the cover {} ({:.3} cm x {:.3} cm)",
        adjusted, plan.cover_width, plan.cover_height
    );
    plan.check_geometry()?;

    let dpi = derive_dpi(config.book.reference_cover_height_px, plan.cover_height)?;
    info!(
        "Resolved {}x{} poster layout at {} dpi",
        config.grid.columns, config.grid.rows, dpi
    );

    Ok(plan.into_layout(config, dpi))
}

/// `round(reference_px / cover_height_cm * 2.54)`
fn derive_dpi(reference_cover_height_px: u32, cover_height_cm: f64) -> Result<u32> {
    let dpi = (reference_cover_height_px as f64 / cover_height_cm * CM_PER_INCH).round();
    if !dpi.is_finite() || dpi < 1.0 || dpi > u32::MAX as f64 {
        return Err(LayoutError::DegenerateGeometry(format!(
            "cannot derive a dpi from a {:.4} cm cover height",
            cover_height_cm
        )));
    }
    Ok(dpi as u32)
}

/// Spacing factors, widened so neighbouring shading bands never overlap
fn effective_spacing_factors(config: &LayoutConfig) -> AxisFactors {
    let spacing = config.grid.cover_spacing_factors;
    if config.year_shading.enable {
        spacing.max(config.year_shading.protrusion_factors.scale(2.0))
    } else {
        spacing
    }
}

/// Everything in a cell below and around the cover, of cover height.
///
/// Each caption line budgets its own leading (`lines x (1 + spacing)`), the
/// same stride `cover_text_position` places lines at. Do not collapse it to
/// `lines + spacing`: the last line would spill into the next cell.
fn non_cover_height_factor(book: &BookConfig, vertical_spacing: f64) -> f64 {
    book.font_height_factor * book.text_lines as f64 * (1.0 + book.line_spacing_factor)
        + vertical_spacing
}

/// Which cover dimension reconciliation shrank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adjusted {
    Width,
    Height,
}

impl std::fmt::Display for Adjusted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Adjusted::Width => f.write_str("width"),
            Adjusted::Height => f.write_str("height"),
        }
    }
}

/// Intermediate geometry in centimeters
#[derive(Debug, Clone, PartialEq)]
struct Plan {
    poster_width: f64,
    poster_height: f64,

    margin_top: f64,
    margin_bottom: f64,
    margin_sides: f64,

    title_font_height: f64,
    title_spacing: f64,
    /// Vertical space reserved for the title (zero when disabled)
    title_block: f64,

    signature_height: f64,
    signature_spacing: f64,
    signature_font_height: f64,
    signature_hspace: f64,
    /// Vertical space reserved for the signature (zero when disabled)
    signature_block: f64,

    spacing_factors: AxisFactors,
    non_cover_height_factor: f64,

    grid_width: f64,
    grid_height: f64,
    cell_width: f64,
    cell_height: f64,
    cover_width: f64,
    cover_height: f64,

    columns: usize,
    rows: usize,
}

/// Steps 1 to 5: geometry before aspect-ratio reconciliation
fn natural_plan(config: &LayoutConfig) -> Result<Plan> {
    let (poster_width, poster_height) = config.poster.dimensions_cm();
    let margins = config.poster.margin_factors;

    let title_font_height = config.title.font_height_factor * poster_height;
    let title_spacing = config.title.spacing_factor * title_font_height;
    let title_block = if config.title.enable {
        title_font_height + title_spacing
    } else {
        0.0
    };

    let signature = &config.signature;
    let signature_height = signature.height_factor * title_font_height;
    let signature_spacing = signature.spacing_factor * signature_height;
    let signature_block = if signature.enable {
        signature_height + signature_spacing
    } else {
        0.0
    };

    let margin_top = margins.top * poster_height;
    let margin_bottom = margins.bottom * poster_height;
    let margin_sides = margins.sides * poster_height;

    let grid_height = poster_height - margin_top - margin_bottom - title_block - signature_block;
    let grid_width = poster_width - 2.0 * margin_sides;
    if grid_width <= 0.0 || grid_height <= 0.0 {
        return Err(LayoutError::DegenerateGeometry(format!(
            "no room for the grid on a {:.1} cm x {:.1} cm poster \
             (grid area {:.2} cm x {:.2} cm)",
            poster_width, poster_height, grid_width, grid_height
        )));
    }

    let columns = config.grid.columns;
    let rows = config.grid.rows;
    let cell_width = grid_width / columns as f64;
    let cell_height = grid_height / rows as f64;

    let spacing_factors = effective_spacing_factors(config);
    let non_cover_height_factor = non_cover_height_factor(&config.book, spacing_factors.vertical);

    Ok(Plan {
        poster_width,
        poster_height,
        margin_top,
        margin_bottom,
        margin_sides,
        title_font_height,
        title_spacing,
        title_block,
        signature_height,
        signature_spacing,
        signature_font_height: signature.font_height_factor * signature_height,
        signature_hspace: signature.hspace_factor * signature_height,
        signature_block,
        spacing_factors,
        non_cover_height_factor,
        grid_width,
        grid_height,
        cell_width,
        cell_height,
        cover_width: cell_width / (1.0 + spacing_factors.horizontal),
        cover_height: cell_height / (1.0 + non_cover_height_factor),
        columns,
        rows,
    })
}

impl Plan {
    fn cover_aspect_ratio(&self) -> f64 {
        self.cover_width / self.cover_height
    }

    /// Shrink the looser cover dimension to the target aspect ratio and hand
    /// the freed grid space to the margins on that axis.
    fn reconcile(&mut self, target_aspect_ratio: f64) -> Adjusted {
        if self.cover_aspect_ratio() > target_aspect_ratio {
            self.cover_width = self.cover_height * target_aspect_ratio;
            self.cell_width = self.cover_width * (1.0 + self.spacing_factors.horizontal);
            self.grid_width = self.cell_width * self.columns as f64;
            self.margin_sides = (self.poster_width - self.grid_width) / 2.0;
            Adjusted::Width
        } else {
            self.cover_height = self.cover_width / target_aspect_ratio;
            self.cell_height = self.cover_height * (1.0 + self.non_cover_height_factor);
            let new_grid_height = self.cell_height * self.rows as f64;
            let freed = (self.grid_height - new_grid_height) / 2.0;
            self.grid_height = new_grid_height;
            self.margin_top += freed;
            self.margin_bottom += freed;
            Adjusted::Height
        }
    }

    fn check_geometry(&self) -> Result<()> {
        // Tolerate float noise around zero
        const EPS: f64 = 1e-9;
        let margins = [
            ("top", self.margin_top),
            ("bottom", self.margin_bottom),
            ("side", self.margin_sides),
        ];
        for (name, margin) in margins {
            if margin < -EPS {
                return Err(LayoutError::DegenerateGeometry(format!(
                    "{} margin would be negative ({:.3} cm)",
                    name, margin
                )));
            }
        }
        if self.cover_width <= 0.0 || self.cover_height <= 0.0 {
            return Err(LayoutError::DegenerateGeometry(format!(
                "cover area would be {:.3} cm x {:.3} cm",
                self.cover_width, self.cover_height
            )));
        }
        Ok(())
    }

    /// Steps 6 and 7: snap everything to the resolved dpi
    fn into_layout(self, config: &LayoutConfig, dpi: u32) -> PosterLayout {
        let cm = |value: f64| Length::from_cm(value, dpi);
        let dims = |width: f64, height: f64| Dimensions::from_cm(width, height, dpi);

        let poster = PosterParameters {
            background: config.poster.background,
            size: dims(self.poster_width, self.poster_height),
            margins: Margins {
                top: cm(self.margin_top.max(0.0)),
                bottom: cm(self.margin_bottom.max(0.0)),
                sides: cm(self.margin_sides.max(0.0)),
            },
        };

        let protrusion = config.year_shading.protrusion_factors;
        let year_shading = YearShadingParameters {
            enable: config.year_shading.enable,
            color1: config.year_shading.color1,
            color2: config.year_shading.color2,
            protrusion: dims(
                protrusion.horizontal * self.cover_width,
                protrusion.vertical * self.cover_height,
            ),
        };

        let book_font_height = config.book.font_height_factor * self.cover_height;
        let book = BookParameters {
            print_rating: config.book.print_rating,
            aspect_ratio: config.book.aspect_ratio,
            cover_area: dims(self.cover_width, self.cover_height),
            font: FontSpec::new(&config.book.font_path, cm(book_font_height)),
            line_spacing: cm(config.book.line_spacing_factor * book_font_height),
            text_lines: config.book.text_lines,
        };

        let title = TitleParameters {
            enable: config.title.enable,
            font: FontSpec::new(&config.title.font_path, cm(self.title_font_height)),
            spacing: cm(self.title_spacing),
        };

        let signature = SignatureParameters {
            enable: config.signature.enable,
            font: FontSpec::new(
                &config.signature.font_path,
                cm(self.signature_font_height),
            ),
            spacing: cm(self.signature_spacing),
            hspace: cm(self.signature_hspace),
            height: cm(self.signature_height),
        };

        // The grid gets exactly what the snapped margins and blocks leave
        let area_width = poster.size.width() - poster.margins.sides.scale(2.0);
        let area_height = poster.size.height()
            - poster.margins.top
            - poster.margins.bottom
            - title.block_height()
            - signature.block_height();
        let grid = GridParameters {
            columns: self.columns,
            rows: self.rows,
            area: Dimensions::from_px(area_width.px(), area_height.px(), dpi),
            cell: Dimensions::from_px(
                area_width.scale(1.0 / self.columns as f64).px(),
                area_height.scale(1.0 / self.rows as f64).px(),
                dpi,
            ),
            cover_spacing: dims(
                self.spacing_factors.horizontal * self.cover_width,
                self.spacing_factors.vertical * self.cover_height,
            ),
        };

        PosterLayout {
            poster,
            grid,
            year_shading,
            book,
            title,
            signature,
            dpi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosterSize;

    fn config_with_target(aspect_ratio: f64) -> LayoutConfig {
        let mut config = LayoutConfig::default();
        config.book.aspect_ratio = aspect_ratio;
        config
    }

    #[test]
    fn test_margins_from_poster_height() {
        let plan = natural_plan(&LayoutConfig::default()).unwrap();
        assert!((plan.margin_top - 0.9).abs() < 1e-9);
        assert!((plan.margin_bottom - 0.9).abs() < 1e-9);
        assert!((plan.margin_sides - 0.9).abs() < 1e-9);
        assert!((plan.title_font_height - 1.8).abs() < 1e-9);
        assert!((plan.signature_height - 2.16).abs() < 1e-9);
    }

    #[test]
    fn test_shading_widens_spacing() {
        let config = LayoutConfig::default();
        let factors = effective_spacing_factors(&config);
        assert!((factors.horizontal - 0.2).abs() < 1e-12);
        assert!((factors.vertical - 0.1).abs() < 1e-12);

        let mut no_shading = config.clone();
        no_shading.year_shading.enable = false;
        assert_eq!(
            effective_spacing_factors(&no_shading),
            config.grid.cover_spacing_factors
        );
    }

    #[test]
    fn test_wide_cells_shrink_width_and_grow_side_margins() {
        // A very narrow target forces the width branch
        let mut plan = natural_plan(&config_with_target(0.3)).unwrap();
        let height_before = plan.cover_height;
        let sides_before = plan.margin_sides;

        assert_eq!(plan.reconcile(0.3), Adjusted::Width);
        assert!((plan.cover_height - height_before).abs() < 1e-12);
        assert!((plan.cover_aspect_ratio() - 0.3).abs() < 1e-12);
        assert!(plan.margin_sides > sides_before);
        assert!(
            (plan.grid_width + 2.0 * plan.margin_sides - plan.poster_width).abs() < 1e-9
        );
    }

    #[test]
    fn test_tall_cells_shrink_height_and_grow_vertical_margins() {
        let mut plan = natural_plan(&config_with_target(3.0)).unwrap();
        let width_before = plan.cover_width;
        let top_before = plan.margin_top;
        let vertical_total = |p: &Plan| {
            p.grid_height + p.margin_top + p.margin_bottom + p.title_block + p.signature_block
        };
        let total_before = vertical_total(&plan);

        assert_eq!(plan.reconcile(3.0), Adjusted::Height);
        assert!((plan.cover_width - width_before).abs() < 1e-12);
        assert!((plan.cover_aspect_ratio() - 3.0).abs() < 1e-12);
        assert!(plan.margin_top > top_before);
        assert!((plan.margin_top - plan.margin_bottom).abs() < 1e-9);
        assert!((vertical_total(&plan) - total_before).abs() < 1e-9);
        assert!((total_before - plan.poster_height).abs() < 1e-9);
    }

    #[test]
    fn test_exact_match_takes_height_branch_without_change() {
        let natural = natural_plan(&LayoutConfig::default()).unwrap();
        let target = natural.cover_aspect_ratio();

        let mut plan = natural.clone();
        // Strict comparison: equality falls through to the height branch
        assert_eq!(plan.reconcile(target), Adjusted::Height);
        assert!((plan.cover_width - natural.cover_width).abs() < 1e-9);
        assert!((plan.cover_height - natural.cover_height).abs() < 1e-9);
        assert!((plan.margin_top - natural.margin_top).abs() < 1e-9);
        assert!((plan.margin_bottom - natural.margin_bottom).abs() < 1e-9);
        assert!((plan.margin_sides - natural.margin_sides).abs() < 1e-9);
    }

    #[test]
    fn test_matching_target_resolves_to_natural_geometry() {
        let natural = natural_plan(&LayoutConfig::default()).unwrap();
        let config = config_with_target(natural.cover_aspect_ratio());
        let layout = resolve_layout(&config).unwrap();
        let dpi = layout.dpi();

        let (width_px, height_px) = layout.book().cover_area.px();
        let natural_cover = Dimensions::from_cm(natural.cover_width, natural.cover_height, dpi);
        assert!((width_px - natural_cover.width().px()).abs() <= 1);
        assert!((height_px - natural_cover.height().px()).abs() <= 1);

        let margins = &layout.poster().margins;
        assert_eq!(margins.top, Length::from_cm(natural.margin_top, dpi));
        assert_eq!(margins.bottom, Length::from_cm(natural.margin_bottom, dpi));
        assert_eq!(margins.sides, Length::from_cm(natural.margin_sides, dpi));
    }

    #[test]
    fn test_dpi_from_reference_height() {
        // 475 px over 10 cm -> 120.65 dpi
        assert_eq!(derive_dpi(475, 10.0).unwrap(), 121);
        assert!(derive_dpi(475, 0.0).is_err());
        assert!(derive_dpi(1, 1e9).is_err());
    }

    #[test]
    fn test_poster_too_small_is_degenerate() {
        let mut config = LayoutConfig::default();
        config.poster.size = PosterSize::Custom {
            width_cm: 10.0,
            height_cm: 10.0,
        };
        config.poster.margin_factors.sides = 0.6;
        assert!(matches!(
            resolve_layout(&config),
            Err(LayoutError::DegenerateGeometry(_))
        ));

        let mut config = LayoutConfig::default();
        config.title.font_height_factor = 0.5;
        assert!(matches!(
            resolve_layout(&config),
            Err(LayoutError::DegenerateGeometry(_))
        ));
    }
}
