//! Year shading bands
//!
//! Items are laid out row-major, so a run of items sharing a group key (the
//! year a book was read) covers a partial first row, zero or more full rows
//! and a partial last row. Each group gets one rectangle per row it touches,
//! colored alternately so neighbouring groups stand apart.

use crate::types::{Color, Result};
use crate::units::Position;

use super::{GridPosition, PosterLayout};

/// The cells of one group within a single grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadingSpan {
    /// Order of the group in the item sequence (0 = first group)
    pub group: usize,
    pub row: usize,
    pub start_col: usize,
    /// Inclusive
    pub end_col: usize,
}

/// A filled rectangle covering one [`ShadingSpan`]
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingBand {
    pub span: ShadingSpan,
    pub color: Color,
    /// Top-left corner
    pub start: Position,
    /// Bottom-right corner
    pub end: Position,
}

/// Grid cell of the first item of every group, followed by the cell just
/// past the last item, which closes the final group.
///
/// A new group starts whenever the key differs from the previous item's key.
pub fn group_starts<K: PartialEq>(keys: &[K], columns: usize) -> Vec<GridPosition> {
    if keys.is_empty() || columns == 0 {
        return Vec::new();
    }
    let cell = |index: usize| GridPosition::new(index / columns, index % columns);

    let mut starts = vec![cell(0)];
    starts.extend(
        keys.windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] != pair[1])
            .map(|(i, _)| cell(i + 1)),
    );
    starts.push(cell(keys.len()));
    starts
}

/// Row spans covered by each group of `keys` on a `columns` x `rows` grid.
///
/// Rows at or past `rows` are dropped, so more items than cells never
/// produce out-of-grid spans.
pub fn shading_spans<K: PartialEq>(keys: &[K], columns: usize, rows: usize) -> Vec<ShadingSpan> {
    let starts = group_starts(keys, columns);
    let last_col = columns.saturating_sub(1);
    let mut spans = Vec::new();

    for (group, pair) in starts.windows(2).enumerate() {
        let (first, next) = (pair[0], pair[1]);
        for row in first.row..=next.row {
            if row >= rows {
                break;
            }
            let start_col = if row == first.row { first.col } else { 0 };
            let end_col = if row == next.row && start_col < next.col {
                next.col - 1
            } else {
                last_col
            };
            // The next group owns this whole row
            if row == next.row && end_col == last_col {
                continue;
            }
            spans.push(ShadingSpan {
                group,
                row,
                start_col,
                end_col,
            });
        }
    }

    spans
}

impl PosterLayout {
    /// Shading spans for items laid out on this layout's grid
    pub fn shading_spans<K: PartialEq>(&self, keys: &[K]) -> Vec<ShadingSpan> {
        shading_spans(keys, self.grid.columns, self.grid.rows)
    }

    /// Colored rectangles for the groups in `keys`.
    ///
    /// Even groups use the first color, odd groups the second. Bands whose
    /// color equals the background are left out, and nothing is produced
    /// when shading is disabled.
    pub fn shading_bands<K: PartialEq>(&self, keys: &[K]) -> Result<Vec<ShadingBand>> {
        let shading = &self.year_shading;
        if !shading.enable {
            return Ok(Vec::new());
        }

        let mut bands = Vec::new();
        for span in self.shading_spans(keys) {
            let color = if span.group % 2 == 0 {
                shading.color1
            } else {
                shading.color2
            };
            if color == self.poster.background {
                continue;
            }
            bands.push(ShadingBand {
                span,
                color,
                start: self.shading_start_position(GridPosition::new(span.row, span.start_col))?,
                end: self.shading_end_position(GridPosition::new(span.row, span.end_col))?,
            });
        }
        Ok(bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(group: usize, row: usize, start_col: usize, end_col: usize) -> ShadingSpan {
        ShadingSpan {
            group,
            row,
            start_col,
            end_col,
        }
    }

    #[test]
    fn test_group_starts_end_with_sentinel() {
        let keys = [2020, 2020, 2020, 2021, 2021, 2022, 2022, 2022, 2022];
        let starts = group_starts(&keys, 3);
        assert_eq!(
            starts,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(1, 0),
                GridPosition::new(1, 2),
                GridPosition::new(3, 0),
            ]
        );
    }

    #[test]
    fn test_three_by_three_years() {
        let keys = [2020, 2020, 2020, 2021, 2021, 2022, 2022, 2022, 2022];
        let spans = shading_spans(&keys, 3, 3);
        assert_eq!(
            spans,
            vec![
                span(0, 0, 0, 2),
                span(1, 1, 0, 1),
                span(2, 1, 2, 2),
                span(2, 2, 0, 2),
            ]
        );
    }

    #[test]
    fn test_single_item_groups() {
        let spans = shading_spans(&[2020, 2021], 3, 3);
        assert_eq!(spans, vec![span(0, 0, 0, 0), span(1, 0, 1, 1)]);
        assert!(spans.iter().all(|s| s.start_col <= s.end_col));
    }

    #[test]
    fn test_group_crossing_several_rows() {
        // Group 1 starts mid-row, fills a whole row and stops mid-row
        let keys = [1, 1, 2, 2, 2, 2, 2, 2, 3];
        let spans = shading_spans(&keys, 3, 4);
        assert_eq!(
            spans,
            vec![
                span(0, 0, 0, 1),
                span(1, 0, 2, 2),
                span(1, 1, 0, 2),
                span(1, 2, 0, 1),
                span(2, 2, 2, 2),
            ]
        );
    }

    #[test]
    fn test_overflow_is_truncated_to_grid() {
        let keys = [1, 1, 1, 2, 2, 2, 3, 3, 3];
        let spans = shading_spans(&keys, 2, 2);
        assert!(!spans.is_empty());
        assert!(spans.iter().all(|s| s.row < 2));
        assert_eq!(spans, vec![span(0, 0, 0, 1), span(0, 1, 0, 0), span(1, 1, 1, 1)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_starts::<i32>(&[], 3).is_empty());
        assert!(shading_spans::<i32>(&[], 3, 3).is_empty());
    }

    #[test]
    fn test_full_grid_single_group() {
        let spans = shading_spans(&[7; 6], 3, 2);
        assert_eq!(spans, vec![span(0, 0, 0, 2), span(0, 1, 0, 2)]);
    }
}
