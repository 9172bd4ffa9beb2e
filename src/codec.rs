use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::CodecError;

/// PNG codec for a fixed canvas size.
///
/// Encoding is lossless at the strongest compression setting. Decoding
/// accepts any format the `image` crate recognizes but refuses images whose
/// dimensions differ from the canvas instead of resizing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCodec {
    width: u32,
    height: u32,
}

impl ImageCodec {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError> {
        self.check_dimensions(image)?;

        let mut bytes = Vec::new();
        let encoder = PngEncoder::new_with_quality(
            Cursor::new(&mut bytes),
            CompressionType::Best,
            FilterType::Adaptive,
        );
        encoder
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(CodecError::Encode)?;

        log::debug!(
            "Encoded {}x{} drawing into {} bytes",
            image.width(),
            image.height(),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, CodecError> {
        let image = image::load_from_memory(bytes)
            .map_err(CodecError::Decode)?
            .to_rgba8();
        self.check_dimensions(&image)?;
        Ok(image)
    }

    fn check_dimensions(&self, image: &RgbaImage) -> Result<(), CodecError> {
        if image.dimensions() == self.dimensions() {
            Ok(())
        } else {
            Err(CodecError::DimensionMismatch {
                expected: self.dimensions(),
                found: image.dimensions(),
            })
        }
    }
}
