//! Image recompression for persisted images.
//!
//! Images coming back from generation (and uploaded reference images) are
//! base64 data URLs that can be several megabytes each. Before a session is
//! persisted they are downscaled so the longer side is at most
//! `max_dimension` pixels and re-encoded as JPEG.
//!
//! Recompression is best-effort: anything that is not an image data URL, or
//! that fails to decode, is passed through unchanged.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::join_all;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use intake_core::config::ImageConfig;
use intake_core::{IntakeError, Result};

const DATA_IMAGE_PREFIX: &str = "data:image";

/// A parsed `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Whether `input` looks like an image data URL.
    pub fn is_image_data_url(input: &str) -> bool {
        input.starts_with(DATA_IMAGE_PREFIX)
    }

    /// Parses a base64 data URL.
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| IntakeError::image("Not a data URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| IntakeError::image("Data URL has no payload"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| IntakeError::image("Only base64 data URLs are supported"))?;
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| IntakeError::image(format!("Invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn encode(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, BASE64.encode(bytes))
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

/// Downscales and re-encodes image data URLs as JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRecompressor {
    max_dimension: u32,
    quality: u8,
}

impl Default for ImageRecompressor {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}

impl ImageRecompressor {
    pub fn new(max_dimension: u32, quality: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            quality: quality.clamp(1, 100),
        }
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(config.max_dimension, config.jpeg_quality)
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Recompresses one image data URL.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: A `data:image/jpeg;base64,...` URL whose longer side
    ///   is at most `max_dimension`
    /// - `Err(_)`: The input is not a decodable image data URL
    pub fn recompress(&self, input: &str) -> Result<String> {
        if !DataUrl::is_image_data_url(input) {
            return Err(IntakeError::image("Not an image data URL"));
        }
        let data = DataUrl::parse(input)?;
        let decoded = image::load_from_memory(&data.bytes)
            .map_err(|e| IntakeError::image(format!("Failed to decode image: {}", e)))?;

        let (width, height) = decoded.dimensions();
        let fitted = if width.max(height) > self.max_dimension {
            decoded.resize(self.max_dimension, self.max_dimension, FilterType::Triangle)
        } else {
            decoded
        };

        let flattened = flatten_on_white(&fitted);
        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, self.quality);
        encoder
            .encode_image(&DynamicImage::ImageRgb8(flattened))
            .map_err(|e| IntakeError::image(format!("Failed to encode JPEG: {}", e)))?;

        Ok(DataUrl::encode("image/jpeg", &bytes))
    }

    /// Recompresses `input`, returning it unchanged when it is not an image
    /// data URL or cannot be processed.
    pub fn recompress_or_passthrough(&self, input: String) -> String {
        if !DataUrl::is_image_data_url(&input) {
            return input;
        }
        match self.recompress(&input) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Image recompression failed, keeping original: {}", e);
                input
            }
        }
    }

    /// Recompresses every image concurrently on the blocking pool.
    ///
    /// Output order matches input order. `None` entries stay `None`.
    pub async fn recompress_all(&self, images: Vec<Option<String>>) -> Vec<Option<String>> {
        let recompressor = *self;
        let tasks = images.into_iter().map(|image| async move {
            let image = image?;
            let fallback = image.clone();
            match tokio::task::spawn_blocking(move || {
                recompressor.recompress_or_passthrough(image)
            })
            .await
            {
                Ok(output) => Some(output),
                Err(e) => {
                    tracing::warn!("Image recompression task failed: {}", e);
                    Some(fallback)
                }
            }
        });
        join_all(tasks).await
    }
}

/// Decoded pixel dimensions of an image data URL.
pub fn data_url_dimensions(input: &str) -> Result<(u32, u32)> {
    let data = DataUrl::parse(input)?;
    let decoded = image::load_from_memory(&data.bytes)
        .map_err(|e| IntakeError::image(format!("Failed to decode image: {}", e)))?;
    Ok(decoded.dimensions())
}

fn flatten_on_white(image: &DynamicImage) -> image::RgbImage {
    let rgba = image.to_rgba8();
    let mut flattened = RgbaImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = u16::from(pixel[3]);
        let blend =
            |channel: u8| -> u8 { (((u16::from(channel) * alpha) + (255 * (255 - alpha))) / 255) as u8 };
        flattened.put_pixel(
            x,
            y,
            Rgba([blend(pixel[0]), blend(pixel[1]), blend(pixel[2]), 255]),
        );
    }
    DynamicImage::ImageRgba8(flattened).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_data_url(width: u32, height: u32) -> String {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        DataUrl::encode("image/png", bytes.get_ref())
    }

    #[test]
    fn test_large_image_is_downscaled_to_jpeg() {
        let recompressor = ImageRecompressor::default();
        let output = recompressor.recompress(&png_data_url(2048, 1024)).unwrap();

        assert!(output.starts_with("data:image/jpeg;base64,"));
        assert_eq!(data_url_dimensions(&output).unwrap(), (1024, 512));
    }

    #[test]
    fn test_small_image_keeps_size() {
        let recompressor = ImageRecompressor::default();
        let output = recompressor.recompress(&png_data_url(40, 30)).unwrap();
        assert_eq!(data_url_dimensions(&output).unwrap(), (40, 30));
    }

    #[test]
    fn test_non_data_urls_pass_through() {
        let recompressor = ImageRecompressor::default();
        let url = "https://picsum.photos/seed/1/800/600".to_string();
        assert_eq!(recompressor.recompress_or_passthrough(url.clone()), url);

        let broken = "data:image/png;base64,AAAA".to_string();
        assert_eq!(recompressor.recompress_or_passthrough(broken.clone()), broken);
    }

    #[test]
    fn test_parse_rejects_non_base64() {
        assert!(DataUrl::parse("data:text/plain,hello").is_err());
        assert!(DataUrl::parse("https://example.com").is_err());
    }

    #[tokio::test]
    async fn test_recompress_all_keeps_order_and_none() {
        let recompressor = ImageRecompressor::new(64, 80);
        let inputs = vec![
            Some(png_data_url(200, 100)),
            None,
            Some("https://example.com/a.png".to_string()),
        ];

        let outputs = recompressor.recompress_all(inputs).await;
        assert_eq!(outputs.len(), 3);
        assert_eq!(
            data_url_dimensions(outputs[0].as_deref().unwrap()).unwrap(),
            (64, 32)
        );
        assert!(outputs[1].is_none());
        assert_eq!(outputs[2].as_deref(), Some("https://example.com/a.png"));
    }
}
