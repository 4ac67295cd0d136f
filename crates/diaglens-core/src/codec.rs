//! Best-effort image payload compression.
//!
//! Converts an arbitrary-resolution image payload (a `data:` URI) into a
//! bounded-size JPEG before it is persisted. Compression never blocks a
//! save: any failure to decode falls back to the original payload.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

const DEFAULT_MAX_EDGE: u32 = 800;
const DEFAULT_JPEG_QUALITY: u8 = 70;

/// Codec configuration.
#[derive(Debug, Clone, Copy)]
pub struct CodecConfig {
    /// Maximum width/height in pixels; a longer edge is scaled down to this,
    /// preserving aspect ratio.
    pub max_edge: u32,
    /// JPEG quality (0-100).
    pub quality: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_edge: DEFAULT_MAX_EDGE,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Re-encode `payload` as a size-bounded JPEG data URI.
///
/// Images larger than `max_edge` on either axis are downscaled so the longer
/// edge equals `max_edge`; smaller images are still re-encoded at the
/// configured quality for format normalization. On any failure (not a data
/// URI, bad base64, malformed or unsupported image) the original payload is
/// returned unchanged.
pub fn compress_image(payload: &str, config: &CodecConfig) -> String {
    match try_compress(payload, config) {
        Ok(compressed) => compressed,
        Err(err) => {
            tracing::warn!("image compression failed, keeping original payload: {err}");
            payload.to_string()
        }
    }
}

fn try_compress(payload: &str, config: &CodecConfig) -> anyhow::Result<String> {
    let encoded = data_uri_payload(payload)
        .ok_or_else(|| anyhow::anyhow!("payload is not a base64 data URI"))?;
    let bytes = BASE64.decode(encoded)?;
    let mut img = image::load_from_memory(&bytes)?;

    if img.width() > config.max_edge || img.height() > config.max_edge {
        img = img.resize(config.max_edge, config.max_edge, FilterType::Triangle);
    }

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = img.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, config.quality);
    rgb.write_with_encoder(encoder)?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        BASE64.encode(out.into_inner())
    ))
}

fn data_uri_payload(payload: &str) -> Option<&str> {
    let rest = payload.strip_prefix("data:")?;
    let (meta, data) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    Some(data)
}
