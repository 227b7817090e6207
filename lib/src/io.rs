//! Boundary helpers: decode, display fitting, save, text export.
//!
//! Decode failures come back as typed errors so the caller can show a
//! placeholder instead of crashing, and saves are staged in memory so a
//! failed write never leaves a partial file behind.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage, RgbImage};
use log::{debug, warn};

use crate::error::{Error, Result};

/// Channel level above which a pixel counts as canvas white for
/// transparent export.
pub const OPACITY_LIMIT: u8 = 245;

/// Decode the image at `path` into a 3-channel buffer.
///
/// Every decoder failure (missing file, truncated data, unsupported
/// format) surfaces as [`Error::Decode`] naming the offending path.
pub fn decode(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    match image::open(path) {
        Ok(img) => {
            let rgb = img.to_rgb8();
            debug!("decoded {:?}: {}x{}", path, rgb.width(), rgb.height());
            Ok(rgb)
        }
        Err(source) => {
            warn!("could not decode {path:?}: {source}");
            Err(Error::Decode {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Scale a buffer down to fit inside `max_width x max_height`, keeping
/// aspect. A buffer already inside the bounds is returned unchanged,
/// never upscaled.
pub fn fit(image: &RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width <= max_width && height <= max_height {
        return image.clone();
    }

    let scale = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);
    let new_width = ((width as f32 * scale) as u32).max(1);
    let new_height = ((height as f32 * scale) as u32).max(1);
    imageops::resize(image, new_width, new_height, FilterType::Triangle)
}

/// Save a buffer to `path` in the raster format named by its extension.
///
/// The image is encoded to memory first and written in a single call, so
/// an encoding failure leaves nothing on disk.
pub fn save(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = save_format(path)?;

    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, format)
        .map_err(|e| encode_error(path, e.to_string()))?;
    fs::write(path, encoded.into_inner()).map_err(|e| encode_error(path, e.to_string()))?;
    debug!("saved {:?} ({:?})", path, format);
    Ok(())
}

/// Save as PNG with near-white pixels made fully transparent.
///
/// Any pixel with all channels above [`OPACITY_LIMIT`] gets alpha 0,
/// turning the white canvas into a sprite-style cutout.
pub fn save_transparent(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if save_format(path)? != ImageFormat::Png {
        return Err(encode_error(
            path,
            "transparent export requires a png extension".to_string(),
        ));
    }

    let (width, height) = image.dimensions();
    let mut rgba = RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let alpha = if r > OPACITY_LIMIT && g > OPACITY_LIMIT && b > OPACITY_LIMIT {
            0
        } else {
            255
        };
        rgba.put_pixel(x, y, Rgba([r, g, b, alpha]));
    }

    let mut encoded = Cursor::new(Vec::new());
    rgba.write_to(&mut encoded, ImageFormat::Png)
        .map_err(|e| encode_error(path, e.to_string()))?;
    fs::write(path, encoded.into_inner()).map_err(|e| encode_error(path, e.to_string()))?;
    Ok(())
}

/// Write text rows to `path`, one line per row.
pub fn write_text(lines: &[String], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut joined = lines.join("\n");
    joined.push('\n');
    fs::write(path, joined).map_err(|e| encode_error(path, e.to_string()))
}

fn save_format(path: &Path) -> Result<ImageFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ImageFormat::from_extension(ext) {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp)) => Ok(format),
        _ => Err(encode_error(
            path,
            format!("unsupported save extension `{ext}`"),
        )),
    }
}

fn encode_error(path: &Path, reason: String) -> Error {
    Error::Encode {
        path: path.to_path_buf(),
        reason,
    }
}
