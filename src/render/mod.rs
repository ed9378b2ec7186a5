//! QR rasterisation of TLV payloads.
//!
//! The symbol text is the base64 encoding of the payload bytes. Rendering
//! parameters are fixed so the same payload always yields the same image.

use std::io::Cursor;

use base64ct::{Base64, Encoding};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::core::QrError;

/// Prefix of the returned data URI.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Error correction level.
pub const EC_LEVEL: EcLevel = EcLevel::L;

/// Byte-mode capacity of a version 40 symbol at [`EC_LEVEL`].
pub const MAX_SYMBOL_LEN: usize = 2953;

/// Pixels per module.
pub const MODULE_PX: u32 = 4;

/// Exact text encoded into the QR symbol.
pub fn symbol_text(payload: &[u8]) -> String {
    Base64::encode_string(payload)
}

/// Whether the symbol text of `payload` fits one QR symbol.
pub fn fits_symbol(payload: &[u8]) -> bool {
    payload.len().div_ceil(3) * 4 <= MAX_SYMBOL_LEN
}

/// Render `payload` as a PNG QR code wrapped in a data URI.
pub fn render(payload: &[u8]) -> Result<String, QrError> {
    let png = render_png(payload)?;
    Ok(format!("{DATA_URI_PREFIX}{}", Base64::encode_string(&png)))
}

/// Render `payload` as raw PNG bytes.
pub fn render_png(payload: &[u8]) -> Result<Vec<u8>, QrError> {
    let text = symbol_text(payload);
    let code = QrCode::with_error_correction_level(text.as_bytes(), EC_LEVEL)
        .map_err(|e| QrError::Render(format!("QR encoding failed: {e}")))?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .module_dimensions(MODULE_PX, MODULE_PX)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| QrError::Render(format!("PNG encoding failed: {e}")))?;
    Ok(png)
}
