//! Font loading and text metrics backed by `rusttype`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use poster_layout::{FontSpec, LayoutError, PosterLayout, TextMeasurer};
use rusttype::{Font, Scale, VMetrics, point};

use crate::types::{RenderError, Result};

/// Parsed fonts keyed by file path
#[derive(Default)]
pub struct FontCache {
    fonts: HashMap<PathBuf, Font<'static>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse font bytes and register them under `path`
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<()> {
        let path = path.into();
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| RenderError::Font(format!("Invalid font file: {}", path.display())))?;
        self.fonts.insert(path, font);
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.fonts.contains_key(path)
    }

    /// Load every font the layout will draw with.
    ///
    /// Fonts of disabled elements are skipped, as is the caption font when no
    /// caption lines are reserved.
    pub async fn for_layout(layout: &PosterLayout) -> Result<Self> {
        let mut paths: Vec<&Path> = Vec::new();
        if layout.book().text_lines > 0 {
            paths.push(layout.book().font.path());
        }
        if layout.title().enable {
            paths.push(layout.title().font.path());
        }
        if layout.signature().enable {
            paths.push(layout.signature().font.path());
        }

        let mut cache = Self::new();
        for path in paths {
            if cache.contains(path) {
                continue;
            }
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                RenderError::Font(format!("Cannot read font {}: {}", path.display(), e))
            })?;
            cache.insert(path, bytes)?;
            log::debug!("Loaded font {}", path.display());
        }
        Ok(cache)
    }

    pub fn font(&self, spec: &FontSpec) -> Result<&Font<'static>> {
        self.fonts.get(spec.path()).ok_or_else(|| {
            RenderError::Font(format!("Font not loaded: {}", spec.path().display()))
        })
    }
}

impl TextMeasurer for FontCache {
    fn text_width_px(&self, spec: &FontSpec, text: &str) -> poster_layout::Result<u32> {
        let font = self
            .fonts
            .get(spec.path())
            .ok_or_else(|| LayoutError::Font(format!("Font not loaded: {}", spec.path().display())))?;
        Ok(advance_width(font, scale(spec), text).ceil() as u32)
    }
}

pub(crate) fn scale(spec: &FontSpec) -> Scale {
    Scale::uniform(spec.size_px() as f32)
}

pub(crate) fn v_metrics(font: &Font<'static>, spec: &FontSpec) -> VMetrics {
    font.v_metrics(scale(spec))
}

/// Distance from the pen start to the pen end after laying out `text`
fn advance_width(font: &Font<'static>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width)
}
