//! Upload image transform.
//!
//! Every uploaded file is normalized before it reaches the object store:
//! decoded, resized to fit the gallery bounding box without ever upscaling,
//! and re-encoded as JPEG at a fixed quality.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;

use crate::error::CoreError;

/// Maximum width of a stored gallery image.
pub const MAX_WIDTH: u32 = 1920;

/// Maximum height of a stored gallery image.
pub const MAX_HEIGHT: u32 = 1080;

/// JPEG quality for re-encoded uploads.
pub const JPEG_QUALITY: u8 = 85;

/// Content type of every stored gallery image.
pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";

/// File extension matching [`OUTPUT_CONTENT_TYPE`].
pub const OUTPUT_EXTENSION: &str = "jpg";

/// A transformed upload ready for the object store.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ProcessedImage {
    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Decode an uploaded file, fit it within [`MAX_WIDTH`]×[`MAX_HEIGHT`]
/// preserving aspect ratio (images already inside the box are left at their
/// original dimensions), and re-encode as JPEG at [`JPEG_QUALITY`].
///
/// Undecodable input is a validation failure, not an internal error.
pub fn process_upload(bytes: &[u8]) -> Result<ProcessedImage, CoreError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Validation(format!("Unreadable image data: {e}")))?;

    let resized = if decoded.width() > MAX_WIDTH || decoded.height() > MAX_HEIGHT {
        decoded.resize(MAX_WIDTH, MAX_HEIGHT, FilterType::Lanczos3)
    } else {
        decoded
    };

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = resized.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut out = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        &mut Cursor::new(&mut out),
        JPEG_QUALITY,
    ))
    .map_err(|e| CoreError::Internal(format!("Image encoding failed: {e}")))?;

    Ok(ProcessedImage {
        bytes: out,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([40, 80, 120]),
        ));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .expect("png encoding in test");
        buf
    }

    #[test]
    fn downscales_oversized_image_preserving_aspect() {
        let processed = process_upload(&png_bytes(3840, 1920)).expect("transform");
        assert_eq!(processed.width, 1920);
        assert_eq!(processed.height, 960);
        assert!(!processed.bytes.is_empty());
    }

    #[test]
    fn tall_image_is_bounded_by_height() {
        let processed = process_upload(&png_bytes(1080, 2160)).expect("transform");
        assert_eq!(processed.height, 1080);
        assert_eq!(processed.width, 540);
    }

    #[test]
    fn small_image_is_never_upscaled() {
        let processed = process_upload(&png_bytes(320, 200)).expect("transform");
        assert_eq!(processed.width, 320);
        assert_eq!(processed.height, 200);
    }

    #[test]
    fn output_is_jpeg() {
        let processed = process_upload(&png_bytes(100, 100)).expect("transform");
        // JPEG SOI marker.
        assert_eq!(&processed.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn garbage_input_is_a_validation_error() {
        let err = process_upload(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
