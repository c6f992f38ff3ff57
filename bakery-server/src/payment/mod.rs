//! Payment QR codes
//!
//! Encodes the payment text (see [`shared::payment`]) as a PNG QR image and
//! returns it as a `data:` URL the client can drop into an `<img>`.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Luma};
use qrcode::QrCode;

use crate::utils::AppResult;
use shared::error::{AppError, ErrorCode};

/// Minimum rendered size (pixels)
const QR_MIN_SIZE: u32 = 200;

/// Render `text` as a PNG QR code `data:` URL
pub fn qr_data_url(text: &str) -> AppResult<String> {
    let png = qr_png(text)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

/// Render `text` as PNG bytes
pub fn qr_png(text: &str) -> AppResult<Vec<u8>> {
    let code = QrCode::new(text.as_bytes()).map_err(qr_error)?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
        .build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(qr_error)?;
    Ok(png)
}

fn qr_error(err: impl std::fmt::Display) -> AppError {
    tracing::error!(error = %err, "QR code generation failed");
    AppError::with_message(ErrorCode::QrCodeFailed, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn png_bytes() {
        let png = qr_png("Bakery Payment - Pay 300.00").unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn data_url_prefix_and_payload() {
        let url = qr_data_url("Pay 0.00").unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert!(decoded.starts_with(PNG_MAGIC));
    }

    #[test]
    fn oversized_payload_is_an_error() {
        let err = qr_png(&"x".repeat(8000)).unwrap_err();
        assert_eq!(err.code, ErrorCode::QrCodeFailed);
    }
}
