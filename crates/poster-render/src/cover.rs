//! Cover image loading and resizing

use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use poster_layout::PosterLayout;

use crate::types::Result;

pub fn load_cover(path: impl AsRef<Path>) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Size a cover for the layout's cover area.
///
/// Covers within `tolerance` of the target aspect ratio (ratio of the larger
/// to the smaller) are stretched to fill the area. Wider covers keep their
/// proportions and take the full width, narrower ones the full height.
pub fn fit_cover(cover: &RgbaImage, layout: &PosterLayout, tolerance: f64) -> RgbaImage {
    let (width, height) = fitted_size(
        (cover.width(), cover.height()),
        layout.book().cover_area.px(),
        layout.book().aspect_ratio,
        tolerance,
    );
    imageops::resize(cover, width, height, FilterType::CatmullRom)
}

fn fitted_size(source: (u32, u32), area: (i64, i64), target: f64, tolerance: f64) -> (u32, u32) {
    let (area_w, area_h) = (area.0.max(1) as f64, area.1.max(1) as f64);
    let aspect_ratio = source.0.max(1) as f64 / source.1.max(1) as f64;

    let (w, h) = if (aspect_ratio / target).max(target / aspect_ratio) < tolerance {
        (area_w, area_h)
    } else if target < aspect_ratio {
        (area_w, (area_w / aspect_ratio).round())
    } else {
        ((area_h * aspect_ratio).round(), area_h)
    };
    (w.max(1.0) as u32, h.max(1.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: (i64, i64) = (300, 460);

    #[test]
    fn test_close_ratio_is_stretched() {
        assert_eq!(fitted_size((310, 475), AREA, 0.6555, 1.15), (300, 460));
    }

    #[test]
    fn test_wide_cover_fills_width() {
        // 1:1 is far wider than the target
        assert_eq!(fitted_size((500, 500), AREA, 0.6555, 1.15), (300, 300));
    }

    #[test]
    fn test_narrow_cover_fills_height() {
        assert_eq!(fitted_size((200, 500), AREA, 0.6555, 1.15), (184, 460));
    }

    #[test]
    fn test_tolerance_of_one_never_stretches() {
        assert_eq!(fitted_size((500, 500), AREA, 0.6555, 1.0), (300, 300));
        let (w, h) = fitted_size((310, 475), AREA, 0.6555, 1.0);
        assert!(w <= 300 && h <= 460);
    }
}
