//! Photo rasterization: loads a photo reference and produces a fixed-size,
//! circularly masked raster for the header.
//!
//! # Contract
//! - `PhotoLoader::rasterize` never fails: any load, decode or encode error is
//!   logged and turned into `None`, and the header renders without a photo.
//! - Success always yields a 96×96 JPEG plus a matching 8-bit alpha mask,
//!   whatever the source aspect ratio (center crop, then resize).
//!
//! Decoding and encoding are CPU-bound and run inside `spawn_blocking`.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Edge length of the rasterized photo in pixels.
pub const PHOTO_SIZE: u32 = 96;
/// JPEG quality factor used for every photo.
pub const JPEG_QUALITY: u8 = 90;

const CENTER: f32 = PHOTO_SIZE as f32 / 2.0;
const RADIUS: f32 = PHOTO_SIZE as f32 / 2.0;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("unsupported photo source: {0}")]
    UnsupportedSource(String),

    #[error("malformed data URI")]
    InvalidDataUri,

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("photo exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("rasterization task failed: {0}")]
    Join(String),
}

/// A 96×96 photo ready to embed: JPEG-encoded color plus a circular alpha mask.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedPhoto {
    pub width: u32,
    pub height: u32,
    /// Baseline JPEG, RGB, `JPEG_QUALITY`.
    pub jpeg: Vec<u8>,
    /// One byte per pixel, row-major, 0 = transparent.
    pub alpha: Vec<u8>,
}

/// Loads photo references (`data:` URIs and http(s) URLs).
#[derive(Clone)]
pub struct PhotoLoader {
    client: Client,
    max_bytes: usize,
}

impl PhotoLoader {
    pub fn new(client: Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    /// Loads and rasterizes `source`. Returns `None` when there is no source
    /// or when anything goes wrong along the way.
    pub async fn rasterize(&self, source: Option<&str>) -> Option<RasterizedPhoto> {
        let source = source.map(str::trim).filter(|s| !s.is_empty())?;

        match self.try_rasterize(source).await {
            Ok(photo) => {
                debug!(jpeg_bytes = photo.jpeg.len(), "photo rasterized");
                Some(photo)
            }
            Err(e) => {
                warn!(error = %e, "photo rasterization failed; rendering without photo");
                None
            }
        }
    }

    async fn try_rasterize(&self, source: &str) -> Result<RasterizedPhoto, PhotoError> {
        let bytes = self.load(source).await?;
        tokio::task::spawn_blocking(move || rasterize_bytes(&bytes))
            .await
            .map_err(|e| PhotoError::Join(e.to_string()))?
    }

    async fn load(&self, source: &str) -> Result<Bytes, PhotoError> {
        if let Some(rest) = source.strip_prefix("data:") {
            let bytes = decode_data_uri(rest)?;
            if bytes.len() > self.max_bytes {
                return Err(PhotoError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            return Ok(Bytes::from(bytes));
        }

        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return self.fetch(source).await;
        }

        // Only the scheme is reported; the rest may be a long inline payload.
        let scheme = source.split(':').next().unwrap_or_default();
        Err(PhotoError::UnsupportedSource(scheme.to_string()))
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, PhotoError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::HttpStatus(status.as_u16()));
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(PhotoError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.max_bytes {
            return Err(PhotoError::TooLarge {
                limit: self.max_bytes,
            });
        }
        Ok(bytes)
    }
}

/// Decodes the part of a `data:` URI after the scheme. Only base64 payloads
/// carry binary images, so anything else is rejected.
fn decode_data_uri(rest: &str) -> Result<Vec<u8>, PhotoError> {
    let (meta, payload) = rest.split_once(',').ok_or(PhotoError::InvalidDataUri)?;
    if !meta.to_ascii_lowercase().ends_with(";base64") {
        return Err(PhotoError::InvalidDataUri);
    }
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

/// Center-crops, resizes, masks and JPEG-encodes raw image bytes.
pub fn rasterize_bytes(bytes: &[u8]) -> Result<RasterizedPhoto, PhotoError> {
    let decoded = image::load_from_memory(bytes)?;
    let square = decoded
        .resize_to_fill(PHOTO_SIZE, PHOTO_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    let mut color = RgbImage::new(PHOTO_SIZE, PHOTO_SIZE);
    let mut alpha = Vec::with_capacity((PHOTO_SIZE * PHOTO_SIZE) as usize);
    // enumerate_pixels is row-major, matching the PDF sample order.
    for (x, y, pixel) in square.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        color.put_pixel(x, y, Rgb([r, g, b]));
        alpha.push((a as f32 * circle_coverage(x, y)).round() as u8);
    }

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), JPEG_QUALITY).encode_image(&color)?;

    Ok(RasterizedPhoto {
        width: PHOTO_SIZE,
        height: PHOTO_SIZE,
        jpeg,
        alpha,
    })
}

/// Fraction of the pixel at (x, y) inside the mask circle, with a one-pixel
/// linear rim.
fn circle_coverage(x: u32, y: u32) -> f32 {
    let dx = x as f32 + 0.5 - CENTER;
    let dy = y as f32 + 0.5 - CENTER;
    let distance = (dx * dx + dy * dy).sqrt();
    (RADIUS + 0.5 - distance).clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
