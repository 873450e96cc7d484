//! Geometry queries on a resolved layout
//!
//! Every position is derived on demand from the immutable [`PosterLayout`];
//! nothing is cached per cell. All positions are absolute offsets from the
//! poster's top-left corner with y growing downwards.

use crate::typography::{FontSpec, TextMeasurer};
use crate::types::{LayoutError, Result, Side};
use crate::units::{Dimensions, Length, Position};

use super::{GridPosition, PosterLayout};

impl PosterLayout {
    fn check_cell(&self, cell: GridPosition) -> Result<()> {
        if self.grid.contains(cell) {
            Ok(())
        } else {
            Err(LayoutError::CellOutOfRange {
                row: cell.row,
                col: cell.col,
                rows: self.grid.rows,
                columns: self.grid.columns,
            })
        }
    }

    fn length(&self, px: i64) -> Length {
        Length::from_px(px, self.dpi)
    }

    /// Row-major grid cell of the `index`-th item
    pub fn grid_position(&self, index: usize) -> GridPosition {
        GridPosition::new(index / self.grid.columns, index % self.grid.columns)
    }

    /// Top-left corner of the cover area of a cell.
    ///
    /// The cover area sits half a cover spacing inside its cell, below the
    /// title block. Cell offsets are fractions of the grid area snapped once,
    /// so the last column still ends on the side margin.
    pub fn cover_area_position(&self, cell: GridPosition) -> Result<Position> {
        self.check_cell(cell)?;
        let margins = &self.poster.margins;
        let half_spacing = self.grid.cover_spacing.scale(0.5);

        let x = margins.sides + self.column_offset(cell.col) + half_spacing.width();
        let y = margins.top
            + self.row_offset(cell.row)
            + self.title.block_height()
            + half_spacing.height();
        Position::new(x, y)
    }

    /// Left edge of column `col` relative to the grid area
    fn column_offset(&self, col: usize) -> Length {
        let fraction = col as f64 / self.grid.columns as f64;
        self.grid.area.width().scale(fraction)
    }

    /// Top edge of row `row` relative to the grid area
    fn row_offset(&self, row: usize) -> Length {
        let fraction = row as f64 / self.grid.rows as f64;
        self.grid.area.height().scale(fraction)
    }

    /// Top-left corner of an image of `cover_size`, centered in the cover area
    pub fn cover_position(&self, cell: GridPosition, cover_size: &Dimensions) -> Result<Position> {
        let area = self.cover_area_position(cell)?;
        let slack = self.book.cover_area.try_sub(cover_size)?;
        area.offset(&slack.scale(0.5))
    }

    /// Top-center anchor of caption line `line` below a cover
    pub fn cover_text_position(&self, cell: GridPosition, line: usize) -> Result<Position> {
        let area = self.cover_area_position(cell)?;
        let cover = &self.book.cover_area;
        let line_spacing = self.book.line_spacing.scale((line + 1) as f64);
        let lines_above = self.book.font_size().scale(line as f64);

        let x = area.x() + cover.width().scale(0.5);
        let y = area.y() + cover.height() + line_spacing + lines_above;
        Position::new(x, y)
    }

    /// Top-center anchor of the title
    pub fn title_position(&self) -> Position {
        let x = self.poster.size.width().scale(0.5);
        Position::from_px(x.px(), self.poster.margins.top.px(), self.dpi)
    }

    /// Top-left corner of a signature's QR code
    pub fn signature_position(&self, side: Side) -> Position {
        let poster = &self.poster;
        let size = self.signature.height;
        let y = poster.size.height() - poster.margins.bottom - size;
        let x = match side {
            Side::Left => poster.margins.sides,
            Side::Right => poster.size.width() - poster.margins.sides - size,
        };
        Position::from_px(x.px(), y.px(), self.dpi)
    }

    /// The square QR code of a signature
    pub fn qr_code_size(&self) -> Dimensions {
        Dimensions::square(self.signature.height)
    }

    /// Vertically centered anchor of a signature's text, on the inner side
    /// of the QR code: the left text starts there, the right text ends there.
    pub fn signature_text_position(&self, side: Side) -> Position {
        let qr = self.signature_position(side);
        let height = self.signature.height;
        let hspace = self.signature.hspace;
        let x = match side {
            Side::Left => qr.x() + height + hspace,
            Side::Right => qr.x() - hspace,
        };
        let y = qr.y() + height.scale(0.5);
        Position::from_px(x.px(), y.px(), self.dpi)
    }

    /// Top-left corner of the shading rectangle starting at `cell`
    pub fn shading_start_position(&self, cell: GridPosition) -> Result<Position> {
        let area = self.cover_area_position(cell)?;
        Ok(area - self.year_shading.protrusion)
    }

    /// Bottom-right corner of the shading rectangle ending at `cell`.
    ///
    /// Vertically the band covers the whole cell below the cover area
    /// (captions included), so bands of adjacent rows meet.
    pub fn shading_end_position(&self, cell: GridPosition) -> Result<Position> {
        let area = self.cover_area_position(cell)?;
        let protrusion = &self.year_shading.protrusion;
        let x = area.x() + self.book.cover_area.width() + protrusion.width();
        let row_height = self.row_offset(cell.row + 1) - self.row_offset(cell.row);
        let y = area.y() + row_height - self.grid.cover_spacing.height() + protrusion.height();
        Position::new(x, y)
    }

    /// Rendered width of `text` as a length in this layout's dpi
    pub fn text_width(
        &self,
        measurer: &dyn TextMeasurer,
        font: &FontSpec,
        text: &str,
    ) -> Result<Length> {
        let px = measurer.text_width_px(font, text)?;
        Ok(self.length(px as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resolve_layout;
    use crate::options::LayoutConfig;

    fn layout() -> PosterLayout {
        resolve_layout(&LayoutConfig::default()).unwrap()
    }

    struct FixedWidth(u32);

    impl TextMeasurer for FixedWidth {
        fn text_width_px(&self, _font: &FontSpec, text: &str) -> Result<u32> {
            Ok(self.0 * text.chars().count() as u32)
        }
    }

    #[test]
    fn test_first_cover_area_is_inside_margins() {
        let layout = layout();
        let pos = layout.cover_area_position(GridPosition::new(0, 0)).unwrap();
        let margins = &layout.poster().margins;
        let half = layout.grid().cover_spacing.scale(0.5);

        assert_eq!(pos.x(), margins.sides + half.width());
        assert_eq!(
            pos.y(),
            margins.top + layout.title().block_height() + half.height()
        );
    }

    #[test]
    fn test_neighbouring_cells_are_one_cell_apart() {
        let layout = layout();
        let (cell_w, cell_h) = layout.grid().cell.px();
        let a = layout.cover_area_position(GridPosition::new(2, 3)).unwrap();
        let right = layout.cover_area_position(GridPosition::new(2, 4)).unwrap();
        let below = layout.cover_area_position(GridPosition::new(3, 3)).unwrap();

        let (dx, dy) = (right - a).px();
        assert_eq!(dy, 0);
        assert!((dx - cell_w).abs() <= 1, "step {} vs cell {}", dx, cell_w);
        let (dx, dy) = (below - a).px();
        assert_eq!(dx, 0);
        assert!((dy - cell_h).abs() <= 1, "step {} vs cell {}", dy, cell_h);
    }

    #[test]
    fn test_out_of_range_cells_are_rejected() {
        let layout = layout();
        let rows = layout.grid().rows;
        let columns = layout.grid().columns;
        assert!(matches!(
            layout.cover_area_position(GridPosition::new(rows, 0)),
            Err(LayoutError::CellOutOfRange { .. })
        ));
        assert!(
            layout
                .cover_area_position(GridPosition::new(0, columns))
                .is_err()
        );
        assert!(
            layout
                .shading_end_position(GridPosition::new(rows, columns))
                .is_err()
        );
    }

    #[test]
    fn test_cover_is_centered_in_cover_area() {
        let layout = layout();
        let cell = GridPosition::new(1, 1);
        let area = layout.cover_area_position(cell).unwrap();
        let (area_w, area_h) = layout.book().cover_area.px();
        let cover = Dimensions::from_px(area_w - 20, area_h - 10, layout.dpi());

        let pos = layout.cover_position(cell, &cover).unwrap();
        assert_eq!((pos - area).px(), (10, 5));

        let foreign = Dimensions::from_px(10, 10, layout.dpi() + 1);
        assert!(layout.cover_position(cell, &foreign).is_err());
    }

    #[test]
    fn test_caption_lines_stack_below_cover() {
        let layout = layout();
        let cell = GridPosition::new(0, 2);
        let area = layout.cover_area_position(cell).unwrap();
        let book = layout.book();

        let first = layout.cover_text_position(cell, 0).unwrap();
        let second = layout.cover_text_position(cell, 1).unwrap();

        assert_eq!(first.x(), area.x() + book.cover_area.width().scale(0.5));
        assert_eq!(
            first.y(),
            area.y() + book.cover_area.height() + book.line_spacing
        );
        assert_eq!(second.y() - first.y(), book.line_spacing + book.font_size());
    }

    #[test]
    fn test_last_caption_line_fits_in_its_cell() {
        let mut config = LayoutConfig::default();
        config.book.text_lines = 4;
        let layout = resolve_layout(&config).unwrap();
        let spacing = layout.grid().cover_spacing.height();

        let last_line = layout.cover_text_position(GridPosition::new(0, 0), 3).unwrap();
        let bottom = last_line.y() + layout.book().font_size();
        let next_cover = layout.cover_area_position(GridPosition::new(1, 0)).unwrap();
        let text_end = next_cover.y() - spacing;

        // Each line carries its own leading; only snapping may spill over.
        // Budgeting a single leading would overshoot by three of them.
        assert!(
            (bottom.px() - text_end.px()).abs() <= 8,
            "caption ends at {} px, text budget at {} px",
            bottom.px(),
            text_end.px()
        );
        assert!(layout.book().line_spacing.scale(3.0).px() > 16);
    }

    #[test]
    fn test_title_is_centered_at_top_margin() {
        let layout = layout();
        let pos = layout.title_position();
        assert_eq!(pos.x(), layout.poster().size.width().scale(0.5));
        assert_eq!(pos.y(), layout.poster().margins.top);
    }

    #[test]
    fn test_signatures_sit_on_bottom_margin() {
        let layout = layout();
        let poster = layout.poster();
        let height = layout.signature().height;

        let left = layout.signature_position(Side::Left);
        let right = layout.signature_position(Side::Right);
        let bottom = poster.size.height() - poster.margins.bottom;

        assert_eq!(left.x(), poster.margins.sides);
        assert_eq!(left.y() + height, bottom);
        assert_eq!(right.y(), left.y());
        assert_eq!(right.x() + height + poster.margins.sides, poster.size.width());
        assert_eq!(layout.qr_code_size().px(), (height.px(), height.px()));

        let hspace = layout.signature().hspace;
        let left_text = layout.signature_text_position(Side::Left);
        let right_text = layout.signature_text_position(Side::Right);
        assert_eq!(left_text.x(), left.x() + height + hspace);
        assert_eq!(right_text.x(), right.x() - hspace);
        assert_eq!(left_text.y(), left.y() + height.scale(0.5));
    }

    #[test]
    fn test_shading_box_surrounds_cover_area() {
        let layout = layout();
        let cell = GridPosition::new(4, 5);
        let area = layout.cover_area_position(cell).unwrap();
        let start = layout.shading_start_position(cell).unwrap();
        let end = layout.shading_end_position(cell).unwrap();
        let protrusion = layout.year_shading().protrusion;

        assert_eq!((area - start).px(), protrusion.px());
        assert!(end.x() > area.x() + layout.book().cover_area.width());
        assert!(end.y() > area.y() + layout.book().cover_area.height());
    }

    #[test]
    fn test_shading_rows_do_not_leave_gaps() {
        let layout = layout();
        let upper_end = layout.shading_end_position(GridPosition::new(0, 0)).unwrap();
        let lower_start = layout
            .shading_start_position(GridPosition::new(1, 0))
            .unwrap();
        assert!(upper_end.y() >= lower_start.y());
    }

    #[test]
    fn test_queries_are_repeatable() {
        let layout = layout();
        let cell = GridPosition::new(3, 3);
        assert_eq!(
            layout.cover_area_position(cell).unwrap(),
            layout.cover_area_position(cell).unwrap()
        );
        assert_eq!(layout.grid_position(19), GridPosition::new(2, 3));
    }

    #[test]
    fn test_text_width_uses_layout_dpi() {
        let layout = layout();
        let width = layout
            .text_width(&FixedWidth(7), &layout.book().font, "abc")
            .unwrap();
        assert_eq!(width.px(), 21);
        assert_eq!(width.dpi(), layout.dpi());
    }
}
