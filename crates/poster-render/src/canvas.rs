//! Clipped drawing primitives over an RGBA image
//!
//! Coordinates are signed pixels so callers can pass layout positions
//! directly; anything outside the image is clipped.

use image::{Rgba, RgbaImage};
use poster_layout::{Color, FontSpec, Position, TextMeasurer};
use rusttype::point;

use crate::fonts::{FontCache, scale, v_metrics};
use crate::types::Result;

/// Which point of a text block the anchor position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Horizontal center of the first line's ascender
    TopCenter,
    /// Left edge, vertical middle of the block
    LeftMiddle,
    /// Right edge, vertical middle of the block
    RightMiddle,
}

pub fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, rgba(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Clamp a half-open pixel range to the image
    fn clip(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = (self.width() as i64, self.height() as i64);
        let (x0, x1) = (x0.clamp(0, w), x1.clamp(0, w));
        let (y0, y1) = (y0.clamp(0, h), y1.clamp(0, h));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Fill the rectangle between two corners, both inclusive
    pub fn fill_rect(&mut self, start: (i64, i64), end: (i64, i64), color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(start.0, start.1, end.0 + 1, end.1 + 1) else {
            return;
        };
        let pixel = rgba(color);
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, pixel);
            }
        }
    }

    /// Draw a border of `line_width` pixels just inside the box at `origin`
    pub fn outline_rect(&mut self, origin: (i64, i64), size: (i64, i64), line_width: i64, color: Color) {
        let (x, y) = origin;
        let (w, h) = size;
        if w <= 0 || h <= 0 || line_width <= 0 {
            return;
        }
        let t = line_width.min(w).min(h);
        let (right, bottom) = (x + w - 1, y + h - 1);
        self.fill_rect((x, y), (right, y + t - 1), color);
        self.fill_rect((x, bottom - t + 1), (right, bottom), color);
        self.fill_rect((x, y), (x + t - 1, bottom), color);
        self.fill_rect((right - t + 1, y), (right, bottom), color);
    }

    /// Copy `src` with its top-left corner at `origin`
    pub fn paste(&mut self, src: &RgbaImage, origin: (i64, i64)) {
        let (ox, oy) = origin;
        let Some((x0, y0, x1, y1)) = self.clip(
            ox,
            oy,
            ox + src.width() as i64,
            oy + src.height() as i64,
        ) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let sx = (x as i64 - ox) as u32;
                let sy = (y as i64 - oy) as u32;
                self.image.put_pixel(x, y, *src.get_pixel(sx, sy));
            }
        }
    }

    /// Draw possibly multi-line `text` anchored at `pos`.
    ///
    /// Every line is aligned on the anchor's edge, or centered for
    /// [`TextAnchor::TopCenter`].
    pub fn draw_text(
        &mut self,
        fonts: &FontCache,
        spec: &FontSpec,
        text: &str,
        pos: Position,
        anchor: TextAnchor,
        color: Color,
    ) -> Result<()> {
        let font = fonts.font(spec)?;
        let metrics = v_metrics(font, spec);
        let line_height = metrics.ascent - metrics.descent + metrics.line_gap;
        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            return Ok(());
        }

        let (x, y) = pos.xy_px();
        let block_height = metrics.ascent - metrics.descent + line_height * (lines.len() - 1) as f32;
        let top = match anchor {
            TextAnchor::TopCenter => y as f32,
            TextAnchor::LeftMiddle | TextAnchor::RightMiddle => y as f32 - block_height / 2.0,
        };

        for (i, line) in lines.iter().enumerate() {
            let width = fonts.text_width_px(spec, line)? as f32;
            let left = match anchor {
                TextAnchor::TopCenter => x as f32 - width / 2.0,
                TextAnchor::LeftMiddle => x as f32,
                TextAnchor::RightMiddle => x as f32 - width,
            };
            let baseline = top + metrics.ascent + line_height * i as f32;
            self.draw_line(font, spec, line, left, baseline, color);
        }
        Ok(())
    }

    fn draw_line(
        &mut self,
        font: &rusttype::Font<'static>,
        spec: &FontSpec,
        text: &str,
        left: f32,
        baseline: f32,
        color: Color,
    ) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        for glyph in font.layout(text, scale(spec), point(left, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px >= w || py >= h || coverage <= 0.0 {
                    return;
                }
                let dst = self.image.get_pixel_mut(px as u32, py as u32);
                blend(dst, color, coverage.min(1.0));
            });
        }
    }
}

fn blend(dst: &mut Rgba<u8>, color: Color, alpha: f32) {
    let inv = 1.0 - alpha;
    let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * inv).round() as u8;
    dst.0[0] = mix(color.r, dst.0[0]);
    dst.0[1] = mix(color.g, dst.0[1]);
    dst.0[2] = mix(color.b, dst.0[2]);
    dst.0[3] = 255;
}
