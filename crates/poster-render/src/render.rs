//! Poster rasterization
//!
//! Elements are drawn in a fixed order so later ones cover earlier ones:
//! background, title, signatures, year shading, covers, then captions.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use poster_layout::{Dimensions, GridPosition, LayoutError, PosterLayout, Side};

use crate::books::{BookRecord, BookSelection, book_text_lines};
use crate::canvas::{Canvas, TextAnchor};
use crate::cover::{fit_cover, load_cover};
use crate::fonts::FontCache;
use crate::options::RenderOptions;
use crate::qr::qr_code;
use crate::types::{RenderError, Result};

/// Draw the selected books onto a new poster image
pub fn render_poster(
    layout: &PosterLayout,
    selection: &BookSelection,
    options: &RenderOptions,
    fonts: &FontCache,
) -> Result<RgbaImage> {
    let (width, height) = layout.poster().size.px();
    let to_u32 = |px: i64| {
        u32::try_from(px).map_err(|_| {
            LayoutError::DegenerateGeometry(format!("poster size {}x{} px", width, height))
        })
    };
    let mut canvas = Canvas::new(to_u32(width)?, to_u32(height)?, layout.poster().background);

    log::info!("Creating {}x{} px poster...", width, height);

    if layout.title().enable {
        let title = options.title.clone().unwrap_or_else(|| selection.title());
        canvas.draw_text(
            fonts,
            &layout.title().font,
            &title,
            layout.title_position(),
            TextAnchor::TopCenter,
            options.text_color,
        )?;
    }

    if layout.signature().enable {
        draw_signatures(&mut canvas, layout, options, fonts)?;
    }

    for band in layout.shading_bands(&selection.year_keys())? {
        canvas.fill_rect(band.start.xy_px(), band.end.xy_px(), band.color);
    }

    let capacity = layout.grid().n_books_total();
    if selection.books.len() > capacity {
        log::warn!(
            "Only the first {} of {} books fit on the poster",
            capacity,
            selection.books.len()
        );
    }

    log::info!("Adding {} books to poster...", selection.books.len().min(capacity));
    for (index, book) in selection.books.iter().take(capacity).enumerate() {
        let cell = layout.grid_position(index);
        draw_cover(&mut canvas, layout, book, cell, options)?;
        draw_caption(&mut canvas, layout, book, cell, options, fonts)?;
    }

    Ok(canvas.into_image())
}

fn draw_signatures(
    canvas: &mut Canvas,
    layout: &PosterLayout,
    options: &RenderOptions,
    fonts: &FontCache,
) -> Result<()> {
    let font = &layout.signature().font;
    let qr_size = layout.qr_code_size().width().px().max(1) as u32;

    match &options.profile_url {
        Some(url) => {
            let qr = qr_code(url, qr_size)?;
            canvas.paste(&qr, layout.signature_position(Side::Left).xy_px());
            canvas.draw_text(
                fonts,
                font,
                &options.follow_text(),
                layout.signature_text_position(Side::Left),
                TextAnchor::LeftMiddle,
                options.text_color,
            )?;
        }
        None => log::info!("No profile URL given, leaving out the left signature"),
    }

    let qr = qr_code(&options.credit_url, qr_size)?;
    canvas.paste(&qr, layout.signature_position(Side::Right).xy_px());
    canvas.draw_text(
        fonts,
        font,
        &options.credit_text,
        layout.signature_text_position(Side::Right),
        TextAnchor::RightMiddle,
        options.text_color,
    )
}

fn draw_cover(
    canvas: &mut Canvas,
    layout: &PosterLayout,
    book: &BookRecord,
    cell: GridPosition,
    options: &RenderOptions,
) -> Result<()> {
    let cover = match load_cover(&book.cover) {
        Ok(cover) => cover,
        Err(e) => {
            log::warn!(
                "Missing cover for '{}' ({}): {}",
                book.title,
                book.cover.display(),
                e
            );
            let origin = layout.cover_area_position(cell)?;
            canvas.outline_rect(
                origin.xy_px(),
                layout.book().cover_area.px(),
                outline_width(layout.book().cover_area.width().px()),
                options.outline_color,
            );
            return Ok(());
        }
    };

    let fitted = fit_cover(&cover, layout, options.stretch_tolerance);
    let size = Dimensions::from_px(fitted.width() as i64, fitted.height() as i64, layout.dpi());
    let origin = layout.cover_position(cell, &size)?.xy_px();
    canvas.paste(&fitted, origin);
    canvas.outline_rect(
        origin,
        size.px(),
        outline_width(size.width().px()),
        options.outline_color,
    );
    Ok(())
}

fn outline_width(cover_width_px: i64) -> i64 {
    (cover_width_px / 200).max(1)
}

fn draw_caption(
    canvas: &mut Canvas,
    layout: &PosterLayout,
    book: &BookRecord,
    cell: GridPosition,
    options: &RenderOptions,
    fonts: &FontCache,
) -> Result<()> {
    let params = layout.book();
    let lines = book_text_lines(book, params.print_rating, params.text_lines);
    for (line, text) in lines.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        canvas.draw_text(
            fonts,
            &params.font,
            text,
            layout.cover_text_position(cell, line)?,
            TextAnchor::TopCenter,
            options.text_color,
        )?;
    }
    Ok(())
}

/// Load the layout's fonts and render on the blocking pool
pub async fn render(
    layout: &PosterLayout,
    selection: &BookSelection,
    options: &RenderOptions,
) -> Result<RgbaImage> {
    let fonts = FontCache::for_layout(layout).await?;

    let layout = layout.clone();
    let selection = selection.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || render_poster(&layout, &selection, &options, &fonts)).await?
}

/// Encode the poster in the format implied by the file extension
pub async fn save_poster(image: RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let format = ImageFormat::from_path(&path)?;

    let bytes = tokio::task::spawn_blocking(move || {
        // The poster is opaque; RGB keeps JPEG output possible
        let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
        let mut writer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb).write_to(&mut writer, format)?;
        Ok::<_, RenderError>(writer.into_inner())
    })
    .await??;

    tokio::fs::write(&path, bytes).await?;
    log::info!("Saved poster to {}", path.display());
    Ok(())
}
