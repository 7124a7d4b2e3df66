//! QR image encoding for redemption URLs.

use crate::errors::Result;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

/// Encodes `payload` as a QR symbol and returns it as PNG bytes.
///
/// The image includes the standard quiet zone and is at least `min_dimension` pixels
/// wide and tall.
///
/// # Errors
/// Returns [`crate::errors::Error::QrCode`] if the payload does not fit in a QR symbol,
/// or [`crate::errors::Error::Image`] if PNG encoding fails.
pub fn render_png(payload: &str, min_dimension: u32) -> Result<Vec<u8>> {
    let code = QrCode::new(payload.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(min_dimension, min_dimension)
        .build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image).write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
