//! QR codes for the signature blocks

use image::{Luma, RgbaImage};
use image::imageops::{self, FilterType};
use qrcode::{Color as Module, EcLevel, QrCode};

use crate::canvas::rgba;
use crate::types::Result;
use poster_layout::Color;

/// Light modules around the code
const QUIET_ZONE: u32 = 1;

/// Black on white QR code for `link`, scaled to `size_px` square
pub fn qr_code(link: &str, size_px: u32) -> Result<RgbaImage> {
    let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::L)?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = modules + 2 * QUIET_ZONE;

    let bitmap = image::ImageBuffer::from_fn(side, side, |x, y| {
        let inside = (QUIET_ZONE..QUIET_ZONE + modules).contains(&x)
            && (QUIET_ZONE..QUIET_ZONE + modules).contains(&y);
        let dark = inside && {
            let index = ((y - QUIET_ZONE) * modules + (x - QUIET_ZONE)) as usize;
            colors[index] == Module::Dark
        };
        Luma([if dark { 0u8 } else { 255u8 }])
    });

    let scaled = imageops::resize(&bitmap, size_px.max(1), size_px.max(1), FilterType::Nearest);
    Ok(RgbaImage::from_fn(scaled.width(), scaled.height(), |x, y| {
        let Luma([v]) = *scaled.get_pixel(x, y);
        rgba(Color::rgb(v, v, v))
    }))
}
